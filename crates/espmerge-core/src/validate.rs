//! Pre- and post-merge layout checks
//!
//! The pre-merge check guards the application image against the test
//! partition's capacity; the post-merge check guards the merged image
//! against the start of the ota_0 slot. Both are skipped when the partition
//! table did not yield the relevant fact.

use crate::error::{Error, Result};

const BAR_LEN: usize = 20;

/// Check the application image against the test partition capacity.
///
/// Emits a usage report whenever the capacity is known, pass or fail.
/// Equality passes; only exceedance is fatal.
pub fn check_app_size(app_size: u64, test_size: Option<u32>) -> Result<()> {
    // A zero capacity behaves like an absent row.
    let Some(capacity) = test_size.filter(|&c| c != 0).map(u64::from) else {
        return Ok(());
    };

    log::info!("{}", usage_report(app_size, capacity));

    if app_size > capacity {
        return Err(Error::AppTooLarge {
            size: app_size,
            capacity,
        });
    }
    Ok(())
}

/// Check the merged image against the ota_0 slot boundary.
///
/// An image that reaches the slot start is a collision: equality fails.
pub fn check_merged_size(merged_size: u64, ota0_offset: Option<u32>) -> Result<()> {
    let Some(offset) = ota0_offset.filter(|&o| o != 0).map(u64::from) else {
        return Ok(());
    };

    if merged_size >= offset {
        return Err(Error::OtaCollision {
            size: merged_size,
            offset,
        });
    }
    log::info!(
        "merged image ends below ota_0 (0x{:X} < 0x{:X}), valid to upload",
        merged_size,
        offset
    );
    Ok(())
}

/// Render the usage line: bar, percentage, hex byte counts.
fn usage_report(used: u64, capacity: u64) -> String {
    let percent = used as f64 / capacity as f64 * 100.0;
    let filled = ((used * BAR_LEN as u64) / capacity).min(BAR_LEN as u64) as usize;
    let bar = format!("{}{}", "=".repeat(filled), " ".repeat(BAR_LEN - filled));
    format!(
        "[{}] {:.1}% (used 0x{:X} bytes of 0x{:X} of test partition)",
        bar, percent, used, capacity
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_equal_to_capacity_passes() {
        assert!(check_app_size(0x100000, Some(0x100000)).is_ok());
    }

    #[test]
    fn app_over_capacity_fails() {
        let err = check_app_size(0x100001, Some(0x100000)).unwrap_err();
        assert!(matches!(
            err,
            Error::AppTooLarge {
                size: 0x100001,
                capacity: 0x100000
            }
        ));
    }

    #[test]
    fn unknown_capacity_skips_pre_check() {
        assert!(check_app_size(u64::MAX, None).is_ok());
    }

    #[test]
    fn zero_capacity_skips_pre_check() {
        assert!(check_app_size(1, Some(0)).is_ok());
    }

    #[test]
    fn merged_below_ota0_passes() {
        assert!(check_merged_size(0x10FFFF, Some(0x110000)).is_ok());
    }

    #[test]
    fn merged_equal_to_ota0_is_a_collision() {
        let err = check_merged_size(0x110000, Some(0x110000)).unwrap_err();
        assert!(matches!(err, Error::OtaCollision { .. }));
    }

    #[test]
    fn unknown_ota0_skips_post_check() {
        assert!(check_merged_size(u64::MAX, None).is_ok());
    }

    #[test]
    fn usage_report_format() {
        // 0x90000 of 0x100000 is 56.25%, eleven filled bar slots.
        let report = usage_report(0x90000, 0x100000);
        assert_eq!(
            report,
            "[===========         ] 56.2% (used 0x90000 bytes of 0x100000 of test partition)"
        );
    }

    #[test]
    fn usage_report_clamps_overflow() {
        let report = usage_report(0x200000, 0x100000);
        assert!(report.starts_with("[====================] 200.0%"));
    }
}
