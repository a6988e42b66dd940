//! Merge command implementation
//!
//! Wires the merge pipeline into the build-stage hook registry and maps the
//! result onto the process exit status: only the fatal size checks propagate
//! as errors, everything else has already been reported and lets the host
//! build continue.

use espmerge_core::hooks::{BuildStage, HookRegistry};
use espmerge_core::merge::{run_merge, MergeOutcome, MergeRequest};
use espmerge_core::process::SystemRunner;
use espmerge_core::project::BuildContext;
use espmerge_core::Result as CoreResult;

use crate::cli::MergeArgs;

/// Run the merge pipeline for the stage selected by the CLI.
pub fn run(stage: BuildStage, args: &MergeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = BuildContext::new(&args.build_dir, &args.project_dir, args.env.as_str());
    let req = MergeRequest {
        mcu: args.mcu.clone(),
        ctx,
        partition_csv: args.partitions.clone(),
        output: args.output.clone(),
        esptool: args.esptool.clone(),
    };

    // The same pipeline serves both triggers; the registry decides which
    // registration fires for this invocation.
    let mut registry: HookRegistry<CoreResult<MergeOutcome>> = HookRegistry::new();
    for hook_stage in [BuildStage::PostBuild, BuildStage::Manual] {
        let req = req.clone();
        registry.register(hook_stage, move || run_merge(&req, &mut SystemRunner));
    }

    for result in registry.fire(stage) {
        match result {
            Ok(MergeOutcome::Merged { output, size }) => {
                log::info!("success -> {} ({} bytes)", output.display(), size);
            }
            // Already reported by the pipeline; the host build continues.
            Ok(MergeOutcome::MissingInputs(_)) | Ok(MergeOutcome::ToolFailed(_)) => {}
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => log::error!("{}", e),
        }
    }

    Ok(())
}
