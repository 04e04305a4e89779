use super::TrackArgs;
use crate::reports;
use autoretime::api;
use autoretime::error::RtResult;
use autoretime::optimizer::NoProgress;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ShiftArgs {
    #[command(flatten)]
    pub tracks: TrackArgs,

    /// Where to write the retimed track. Overwrites the target when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ShiftArgs) -> RtResult<()> {
    let target = &args.tracks.target;
    let report = api::align_files(
        &args.tracks.reference,
        target,
        args.tracks.reference_scale(),
        &args.tracks.config.search,
        NoProgress,
    )?;
    reports::print_verdict(&report);

    if !report.improved() {
        info!("No shift beats the unshifted track; writing it unchanged");
    }

    let output = args.output.as_ref().unwrap_or(target);
    let written = api::shift_file(target, output, report.best_shift_ms)?;
    println!("Wrote {} events to {}", written, output.display());
    Ok(())
}
