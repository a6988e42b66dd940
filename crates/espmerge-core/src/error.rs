//! Error types for espmerge-core
//!
//! Only the two size-check variants abort the host build. Everything else a
//! merge run can hit (missing inputs, a failing merge tool) is reported
//! through [`MergeOutcome`](crate::merge::MergeOutcome) so a bad merge does
//! not block an otherwise successful compile.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Application image does not fit the test partition
    #[error("application image 0x{size:X} bytes exceeds test partition size 0x{capacity:X}")]
    AppTooLarge {
        /// Application image size in bytes
        size: u64,
        /// Test partition capacity in bytes
        capacity: u64,
    },

    /// Merged image reaches into the ota_0 slot
    #[error("merged image size 0x{size:X} exceeds ota_0 offset 0x{offset:X}")]
    OtaCollision {
        /// Merged image size in bytes
        size: u64,
        /// Flash offset of the ota_0 partition
        offset: u64,
    },

    /// I/O failure on a required path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error must abort the host build
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::AppTooLarge { .. } | Error::OtaCollision { .. })
    }
}

/// Result type alias using the core Error type
pub type Result<T> = std::result::Result<T, Error>;
