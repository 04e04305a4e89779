use super::mutation;
use super::{AnnealRecord, AnnealSchedule, Annealer, Landscape};
use crate::config::SolverParams;
use crate::error::RtResult;
use crate::events::Event;
use crate::scorer::MismatchScorer;
use fastrand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::{debug, info};

/// Intermediate state of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub iteration: usize,
    pub temperature: f64,
    pub candidate_shift_ms: f64,
    pub mismatch_score: usize,
}

/// Best shift found by a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub best_shift_ms: f64,
    pub best_mismatch_score: usize,
}

/// Serialized without a tag: the terminal record is the one lacking `iteration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolverEvent {
    Progress(Progress),
    Finished(Solution),
}

/// Gaussian proposals around the current shift, scored by bucket mismatch.
pub struct ShiftLandscape {
    scorer: Arc<MismatchScorer>,
}

impl ShiftLandscape {
    pub fn new(scorer: Arc<MismatchScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &MismatchScorer {
        &self.scorer
    }
}

impl Landscape for ShiftLandscape {
    type Cost = usize;

    fn propose(&self, state: f64, temperature: f64, rng: &mut Rng) -> f64 {
        mutation::gaussian(rng, state, temperature)
    }

    fn evaluate(&self, state: f64) -> usize {
        self.scorer.score(state)
    }
}

/// A lazy alignment search; every `next` runs one annealing iteration.
pub struct AlignmentSearch {
    annealer: Annealer<ShiftLandscape>,
}

impl AlignmentSearch {
    pub fn new(scorer: Arc<MismatchScorer>, params: &SolverParams, rng: Rng) -> Self {
        let schedule = AnnealSchedule {
            t0: params.t0,
            decay: params.effective_decay(),
            iterations: params.iterations,
        };
        Self {
            annealer: Annealer::new(ShiftLandscape::new(scorer), 0.0, schedule, rng),
        }
    }

    pub fn scorer(&self) -> &MismatchScorer {
        self.annealer.landscape().scorer()
    }

    /// Best solution seen so far, usable after abandoning the search early.
    pub fn best(&self) -> Solution {
        let (best_shift_ms, best_mismatch_score) = self.annealer.best();
        Solution {
            best_shift_ms,
            best_mismatch_score,
        }
    }
}

impl Iterator for AlignmentSearch {
    type Item = SolverEvent;

    fn next(&mut self) -> Option<SolverEvent> {
        let record = match self.annealer.next()? {
            AnnealRecord::Step {
                iteration,
                temperature,
                state,
                cost,
            } => SolverEvent::Progress(Progress {
                iteration,
                temperature,
                candidate_shift_ms: state,
                mismatch_score: cost,
            }),
            AnnealRecord::Best { state, cost } => SolverEvent::Finished(Solution {
                best_shift_ms: state,
                best_mismatch_score: cost,
            }),
        };
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.annealer.size_hint()
    }
}

impl FusedIterator for AlignmentSearch {}

/// Starts a search for the shift that best aligns `target` onto `reference`.
///
/// The caller owns `rng`; identical seeds give identical record streams.
pub fn search(
    reference: &[Event],
    target: &[Event],
    params: &SolverParams,
    rng: Rng,
) -> RtResult<AlignmentSearch> {
    params.validate()?;
    let scorer = MismatchScorer::with_comments(
        reference,
        target,
        params.unit,
        params.include_comments,
    )?;
    Ok(AlignmentSearch::new(Arc::new(scorer), params, rng))
}

/// A trait for receiving updates during optimization.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, restart: usize, progress: &Progress) -> bool;
}

/// Ignores every update and never aborts.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _restart: usize, _progress: &Progress) -> bool {
        true
    }
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, &Progress) -> bool + Send + Sync,
{
    fn on_progress(&self, restart: usize, progress: &Progress) -> bool {
        self(restart, progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub solution: Solution,
    pub baseline: usize,
    pub restart: usize,
    pub iterations_run: usize,
}

/// Runs one or more independent searches over a shared scorer.
pub struct Optimizer {
    scorer: Arc<MismatchScorer>,
    params: SolverParams,
}

impl Optimizer {
    pub fn new(reference: &[Event], target: &[Event], params: SolverParams) -> RtResult<Self> {
        params.validate()?;
        let scorer = MismatchScorer::with_comments(
            reference,
            target,
            params.unit,
            params.include_comments,
        )?;
        Ok(Self {
            scorer: Arc::new(scorer),
            params,
        })
    }

    pub fn scorer(&self) -> &MismatchScorer {
        &self.scorer
    }

    fn rng_for(&self, restart: usize) -> Rng {
        match self.params.seed {
            Some(s) => Rng::with_seed(s.wrapping_add(restart as u64)),
            None => Rng::new(),
        }
    }

    fn run_single<CB: ProgressCallback>(&self, restart: usize, callback: &CB) -> OptimizationResult {
        let mut search =
            AlignmentSearch::new(self.scorer.clone(), &self.params, self.rng_for(restart));
        let baseline = search.scorer().baseline();
        let mut iterations_run = 0;

        let solution = loop {
            match search.next() {
                Some(SolverEvent::Progress(p)) => {
                    iterations_run += 1;
                    if !callback.on_progress(restart, &p) {
                        debug!("Restart {} stopped at iteration {}", restart, p.iteration);
                        break search.best();
                    }
                }
                Some(SolverEvent::Finished(s)) => break s,
                None => break search.best(),
            }
        };

        OptimizationResult {
            solution,
            baseline,
            restart,
            iterations_run,
        }
    }

    pub fn run<CB: ProgressCallback>(&self, callback: CB) -> OptimizationResult {
        let restarts = self.params.restarts;
        info!(
            "Searching {} restart(s) x {} iterations (t0={}, decay={:.5}, unit={}ms)",
            restarts,
            self.params.iterations,
            self.params.t0,
            self.params.effective_decay(),
            self.params.unit
        );

        let results: Vec<OptimizationResult> = (0..restarts)
            .into_par_iter()
            .map(|i| self.run_single(i, &callback))
            .collect();

        let baseline = self.scorer.baseline();
        // Lowest score wins; ties go to the earliest restart.
        let best = results
            .into_iter()
            .min_by_key(|r| (r.solution.best_mismatch_score, r.restart))
            .unwrap_or(OptimizationResult {
                solution: Solution {
                    best_shift_ms: 0.0,
                    best_mismatch_score: baseline,
                },
                baseline,
                restart: 0,
                iterations_run: 0,
            });

        info!(
            "Best shift {:.0}ms (mismatch {} -> {}) from restart {}",
            best.solution.best_shift_ms,
            best.baseline,
            best.solution.best_mismatch_score,
            best.restart
        );
        best
    }
}
