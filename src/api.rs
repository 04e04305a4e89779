use crate::config::SolverParams;
use crate::error::{RetimeError, RtResult};
use crate::events::{self, Event, TimecodeScale};
use crate::optimizer::{Optimizer, ProgressCallback};
use crate::scorer::MismatchDetails;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentReport {
    pub reference_path: PathBuf,
    pub target_path: PathBuf,
    pub reference_events: usize,
    pub target_events: usize,

    pub baseline: MismatchDetails,
    pub best: MismatchDetails,
    pub best_shift_ms: f64,
    pub best_mismatch_score: usize,

    pub restart: usize,
    pub iterations_run: usize,
}

impl AlignmentReport {
    pub fn shift_seconds(&self) -> f64 {
        self.best_shift_ms / 1000.0
    }

    pub fn improved(&self) -> bool {
        self.best_mismatch_score < self.baseline.total()
    }
}

fn ensure_nonempty(track: Vec<Event>, path: &Path, role: &str) -> RtResult<Vec<Event>> {
    if track.is_empty() {
        return Err(RetimeError::Validation(format!(
            "{} track '{}' contains no events",
            role,
            path.display()
        )));
    }
    Ok(track)
}

/// Service: Load the reference track.
///
/// With a timecode scale the file holds demuxer frames (seconds) that are
/// rescaled into millisecond events; otherwise it is a plain event track.
pub fn load_reference<P: AsRef<Path>>(
    path: P,
    timecode_scale: Option<TimecodeScale>,
) -> RtResult<Vec<Event>> {
    let path = path.as_ref();
    let track = match timecode_scale {
        Some(scale) => events::load_frames(path, scale)?,
        None => events::load_track(path)?,
    };
    ensure_nonempty(track, path, "Reference")
}

/// Service: Align two event tracks stored on disk.
pub fn align_files<P, Q, CB>(
    reference_path: P,
    target_path: Q,
    timecode_scale: Option<TimecodeScale>,
    params: &SolverParams,
    callback: CB,
) -> RtResult<AlignmentReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    CB: ProgressCallback,
{
    let reference_path = reference_path.as_ref();
    let target_path = target_path.as_ref();

    info!("Loading reference track: {}", reference_path.display());
    let reference = load_reference(reference_path, timecode_scale)?;
    info!("Loading target track: {}", target_path.display());
    let target = ensure_nonempty(events::load_track(target_path)?, target_path, "Target")?;

    let mut report = align_events(&reference, &target, params, callback)?;
    report.reference_path = reference_path.to_path_buf();
    report.target_path = target_path.to_path_buf();
    Ok(report)
}

/// Service: Align two in-memory event tracks.
pub fn align_events<CB: ProgressCallback>(
    reference: &[Event],
    target: &[Event],
    params: &SolverParams,
    callback: CB,
) -> RtResult<AlignmentReport> {
    let optimizer = Optimizer::new(reference, target, params.clone())?;
    let scorer = optimizer.scorer();

    if scorer.reference_len() == 0 || scorer.target_len() == 0 {
        warn!(
            "Empty occupancy (reference={} buckets, target={} buckets); every shift scores the same",
            scorer.reference_len(),
            scorer.target_len()
        );
    }

    let result = optimizer.run(callback);

    Ok(AlignmentReport {
        reference_path: PathBuf::new(),
        target_path: PathBuf::new(),
        reference_events: reference.len(),
        target_events: target.len(),
        baseline: scorer.details(0.0),
        best: scorer.details(result.solution.best_shift_ms),
        best_shift_ms: result.solution.best_shift_ms,
        best_mismatch_score: result.solution.best_mismatch_score,
        restart: result.restart,
        iterations_run: result.iterations_run,
    })
}

/// Service: Write `target_path` shifted by `delta_ms` to `output_path`.
pub fn shift_file<P: AsRef<Path>, Q: AsRef<Path>>(
    target_path: P,
    output_path: Q,
    delta_ms: f64,
) -> RtResult<usize> {
    let target = events::load_track(target_path.as_ref())?;
    let shifted = events::shift_events(&target, delta_ms);
    events::save_track(output_path.as_ref(), &shifted)?;
    info!(
        "Shifted {} events by {:.0}ms into {}",
        shifted.len(),
        delta_ms.round(),
        output_path.as_ref().display()
    );
    Ok(shifted.len())
}
