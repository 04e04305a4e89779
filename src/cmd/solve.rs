use super::TrackArgs;
use crate::reports;
use autoretime::api;
use autoretime::error::RtResult;
use autoretime::events;
use autoretime::optimizer::{self, NoProgress, Progress};
use clap::Args;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub tracks: TrackArgs,

    /// Print every progress record
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Stream raw records as JSON lines (single search)
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: SolveArgs) -> RtResult<()> {
    if args.json {
        return stream_json(&args);
    }

    let params = &args.tracks.config.search;
    let scale = args.tracks.reference_scale();
    let report = if args.progress {
        api::align_files(
            &args.tracks.reference,
            &args.tracks.target,
            scale,
            params,
            |restart: usize, p: &Progress| {
                reports::print_progress(restart, p);
                true
            },
        )?
    } else {
        api::align_files(
            &args.tracks.reference,
            &args.tracks.target,
            scale,
            params,
            NoProgress,
        )?
    };

    reports::print_summary(&report);
    reports::print_verdict(&report);
    Ok(())
}

fn stream_json(args: &SolveArgs) -> RtResult<()> {
    let params = &args.tracks.config.search;
    if params.restarts > 1 {
        warn!("--json streams a single search; ignoring --restarts {}", params.restarts);
    }

    let reference = api::load_reference(&args.tracks.reference, args.tracks.reference_scale())?;
    let target = events::load_track(&args.tracks.target)?;
    let rng = match params.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    for record in optimizer::search(&reference, &target, params, rng)? {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}
