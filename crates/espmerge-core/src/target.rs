//! Target profile resolution
//!
//! Maps an MCU identifier to flash offsets and variant-specific assets. An
//! unknown or empty identifier never fails resolution: these profiles feed a
//! merge across many boards, and a board this table has never heard of still
//! gets a usable default layout.

use std::path::{Path, PathBuf};

/// Flash offset of the partition table binary, identical across targets.
pub const PART_TABLE_OFFSET: u32 = 0x8000;

/// Flash offset of the optional NVS blob.
pub const NVS_OFFSET: u32 = 0x9000;

/// Default flash offset of the application image.
pub const APP_OFFSET: u32 = 0x10000;

/// Chip argument handed to the merge tool when the MCU string is empty.
pub const DEFAULT_CHIP: &str = "esp32";

/// Bootloader offsets for known MCUs. Anything else boots at 0x0.
const BOOT_OFFSETS: &[(&str, u32)] = &[
    ("esp32", 0x1000),
    ("esp32s3", 0x0000),
    ("esp32c5", 0x2000),
    ("esp32p4", 0x2000),
];

const DEFAULT_BOOT_OFFSET: u32 = 0x0000;

/// Resolved flash layout and assets for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProfile {
    /// Normalized (lowercased, trimmed) MCU identifier; may be empty
    pub mcu: String,
    /// Chip argument for the merge tool
    pub chip: String,
    /// Flash offset of the bootloader
    pub boot_offset: u32,
    /// Flash offset of the application image
    pub app_offset: u32,
    /// Chip-specific binary merged at offset 0 in place of the bootloader
    pub chip_asset: Option<PathBuf>,
    /// Pre-built NVS blob for this target
    pub nvs_asset: PathBuf,
}

impl TargetProfile {
    /// Resolve the profile for `mcu`, with assets located under `project_dir`.
    pub fn resolve(mcu: &str, project_dir: &Path) -> Self {
        let mcu = mcu.trim().to_ascii_lowercase();
        let boot_offset = BOOT_OFFSETS
            .iter()
            .find(|(name, _)| *name == mcu)
            .map(|&(_, offset)| offset)
            .unwrap_or(DEFAULT_BOOT_OFFSET);
        let chip = if mcu.is_empty() {
            DEFAULT_CHIP.to_string()
        } else {
            mcu.clone()
        };
        let support = project_dir.join("support_files");

        // The P4 boots through a chip-specific first-stage blob at offset 0
        // and places the application higher up.
        if mcu == "esp32p4" {
            TargetProfile {
                mcu,
                chip,
                boot_offset,
                app_offset: 0x20000,
                chip_asset: Some(support.join("esp32p4.bin")),
                nvs_asset: support.join("nvs_p4.bin"),
            }
        } else {
            TargetProfile {
                mcu,
                chip,
                boot_offset,
                app_offset: APP_OFFSET,
                chip_asset: None,
                nvs_asset: support.join("nvs.bin"),
            }
        }
    }
}
