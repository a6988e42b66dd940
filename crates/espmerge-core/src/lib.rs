//! espmerge-core - Core library for flashable-image assembly
//!
//! This crate contains the logic for merging independently built binary
//! segments (bootloader, partition table, optional NVS blob, application)
//! into one flashable image for an ESP32-family target, and for validating
//! the result against the project's partition table.
//!
//! The byte-level merge is delegated to the external `esptool merge-bin`
//! tool through the [`process::ProcessRunner`] seam, so everything in here
//! is testable without esptool installed.
//!
//! # Example
//!
//! ```ignore
//! use espmerge_core::merge::{run_merge, MergeRequest};
//! use espmerge_core::process::SystemRunner;
//! use espmerge_core::project::BuildContext;
//!
//! let req = MergeRequest::new(
//!     "esp32",
//!     BuildContext::new(".pio/build/launcher", ".", "launcher"),
//! );
//! let outcome = run_merge(&req, &mut SystemRunner)?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod hooks;
pub mod merge;
pub mod partition;
pub mod process;
pub mod project;
pub mod target;
pub mod validate;

pub use error::{Error, Result};
