//! Image assembly and merge-bin invocation
//!
//! Composes the ordered segment list for a target, verifies the inputs
//! exist, invokes the external merge tool and runs the layout checks around
//! it. Each merge is one pass through
//! resolve → parse → verify inputs → pre-check → assemble → invoke → post-check;
//! nothing survives the invocation.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::partition::PartitionTable;
use crate::process::{ProcessOutput, ProcessRunner};
use crate::project::BuildContext;
use crate::target::{TargetProfile, NVS_OFFSET, PART_TABLE_OFFSET};
use crate::validate;

/// One input binary placed at a flash offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Flash offset the binary is merged at
    pub offset: u32,
    /// Source binary
    pub path: PathBuf,
}

/// A fully composed merge invocation, executed once and discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
    /// Chip argument for the merge tool
    pub chip: String,
    /// Segments in merge order; never re-sorted
    pub segments: Vec<Segment>,
    /// Merged image path
    pub output: PathBuf,
}

impl MergeJob {
    /// Argument vector for `<tool> merge-bin ...`.
    ///
    /// Segment order and lowercase hex offsets are part of the wire contract
    /// with esptool.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "merge-bin".into(),
            "--chip".into(),
            self.chip.clone().into(),
            "--output".into(),
            self.output.clone().into(),
        ];
        for segment in &self.segments {
            args.push(format!("{:#x}", segment.offset).into());
            args.push(segment.path.clone().into());
        }
        args
    }
}

/// Result of a merge attempt that did not abort the host build
#[derive(Debug)]
pub enum MergeOutcome {
    /// Merge completed and passed the post-merge check
    Merged {
        /// Merged image path
        output: PathBuf,
        /// Merged image size in bytes
        size: u64,
    },
    /// Required input binaries were absent; no merge was attempted
    MissingInputs(Vec<PathBuf>),
    /// The merge tool exited non-zero
    ToolFailed(ProcessOutput),
}

/// Everything one merge invocation needs
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// MCU identifier; may be empty or unrecognized
    pub mcu: String,
    /// Build-tree locations
    pub ctx: BuildContext,
    /// Partition CSV override; defaults to `<project_dir>/partitions.csv`
    pub partition_csv: Option<PathBuf>,
    /// Output override; defaults to `<project_dir>/merged-<env>.bin`
    pub output: Option<PathBuf>,
    /// Merge tool to invoke
    pub esptool: String,
}

impl MergeRequest {
    /// Request with default CSV, output and tool locations.
    pub fn new(mcu: impl Into<String>, ctx: BuildContext) -> Self {
        Self {
            mcu: mcu.into(),
            ctx,
            partition_csv: None,
            output: None,
            esptool: "esptool".to_string(),
        }
    }
}

/// Compose the ordered segment list for `profile`.
///
/// `include_nvs` is the flag-file predicate, evaluated once per merge by the
/// caller. The partition table is always the second segment and the
/// application always the last.
pub fn build_segments(
    profile: &TargetProfile,
    ctx: &BuildContext,
    include_nvs: bool,
) -> Vec<Segment> {
    let mut segments = Vec::new();

    match &profile.chip_asset {
        Some(asset) => segments.push(Segment {
            offset: 0x0,
            path: asset.clone(),
        }),
        None => segments.push(Segment {
            offset: profile.boot_offset,
            path: ctx.bootloader_bin(),
        }),
    }
    segments.push(Segment {
        offset: PART_TABLE_OFFSET,
        path: ctx.partitions_bin(),
    });
    if include_nvs {
        segments.push(Segment {
            offset: NVS_OFFSET,
            path: profile.nvs_asset.clone(),
        });
    }
    segments.push(Segment {
        offset: profile.app_offset,
        path: ctx.app_bin(),
    });

    segments
}

/// Run one full merge pass.
///
/// Returns `Err` only for the two fatal size checks and for I/O failures on
/// paths the pipeline needs; every other failure mode is reported through
/// [`MergeOutcome`] so the host build can continue.
pub fn run_merge<R: ProcessRunner>(req: &MergeRequest, runner: &mut R) -> Result<MergeOutcome> {
    let ctx = &req.ctx;
    let profile = TargetProfile::resolve(&req.mcu, &ctx.project_dir);
    log::debug!(
        "resolved target: chip={} boot=0x{:x} app=0x{:x}",
        profile.chip,
        profile.boot_offset,
        profile.app_offset
    );

    let required = [ctx.bootloader_bin(), ctx.partitions_bin(), ctx.app_bin()];
    let missing: Vec<PathBuf> = required.into_iter().filter(|p| !p.exists()).collect();
    if !missing.is_empty() {
        log::error!("missing input files, merge aborted:");
        for path in &missing {
            log::error!("  - {}", path.display());
        }
        return Ok(MergeOutcome::MissingInputs(missing));
    }

    let csv = req.partition_csv.clone().unwrap_or_else(|| ctx.partition_csv());
    let table = PartitionTable::from_csv_file(&csv);
    log::debug!(
        "partition table {}: {} records, test_size={:?} ota0_offset={:?}",
        csv.display(),
        table.len(),
        table.test_size,
        table.ota0_offset
    );

    let app_size = file_size(&ctx.app_bin())?;
    validate::check_app_size(app_size, table.test_size)?;

    let include_nvs = ctx.nvs_flag().exists();
    let job = MergeJob {
        chip: profile.chip.clone(),
        segments: build_segments(&profile, ctx, include_nvs),
        output: req.output.clone().unwrap_or_else(|| ctx.default_output()),
    };
    if include_nvs {
        log::info!(
            "NVS flag file detected, including {} in the merge",
            profile.nvs_asset.display()
        );
    }

    log::info!(
        "merging {} segments into {}",
        job.segments.len(),
        job.output.display()
    );
    let result = runner
        .run(&req.esptool, &job.to_args())
        .map_err(|source| Error::Io {
            path: PathBuf::from(&req.esptool),
            source,
        })?;

    if !result.success() {
        log::error!("merge tool failed with exit code {:?}", result.code);
        if !result.stdout.is_empty() {
            log::error!("{}", result.stdout.trim_end());
        }
        if !result.stderr.is_empty() {
            log::error!("{}", result.stderr.trim_end());
        }
        return Ok(MergeOutcome::ToolFailed(result));
    }

    // A vanished output counts as zero bytes, same as an empty merge.
    let merged_size = fs::metadata(&job.output).map(|m| m.len()).unwrap_or(0);
    log::info!(
        "merged image written to {} ({} bytes)",
        job.output.display(),
        merged_size
    );
    validate::check_merged_size(merged_size, table.ota0_offset)?;

    Ok(MergeOutcome::Merged {
        output: job.output,
        size: merged_size,
    })
}

fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}
