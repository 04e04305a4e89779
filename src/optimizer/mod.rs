pub mod mutation;
pub mod runner;

pub use self::runner::{
    search, AlignmentSearch, NoProgress, OptimizationResult, Optimizer, Progress,
    ProgressCallback, ShiftLandscape, Solution, SolverEvent,
};
use fastrand::Rng;
use std::fmt::Debug;
use std::iter::FusedIterator;

/// A cost the annealer can compare and feed into its acceptance rule.
pub trait Energy: Copy + PartialOrd + Debug {
    fn to_f64(self) -> f64;
}

impl Energy for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Energy for usize {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// The problem an [`Annealer`] walks over: how to propose a neighbour of a
/// state, and what a state costs.
pub trait Landscape {
    type Cost: Energy;

    fn propose(&self, state: f64, temperature: f64, rng: &mut Rng) -> f64;
    fn evaluate(&self, state: f64) -> Self::Cost;
}

/// Adapts a pair of closures into a [`Landscape`].
pub struct FnLandscape<M, O> {
    propose: M,
    evaluate: O,
}

impl<M, O> FnLandscape<M, O> {
    pub fn new(propose: M, evaluate: O) -> Self {
        Self { propose, evaluate }
    }
}

impl<M, O, C> Landscape for FnLandscape<M, O>
where
    M: Fn(f64, f64, &mut Rng) -> f64,
    O: Fn(f64) -> C,
    C: Energy,
{
    type Cost = C;

    fn propose(&self, state: f64, temperature: f64, rng: &mut Rng) -> f64 {
        (self.propose)(state, temperature, rng)
    }

    fn evaluate(&self, state: f64) -> C {
        (self.evaluate)(state)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnnealSchedule {
    pub t0: f64,
    pub decay: f64,
    pub iterations: usize,
}

/// One record of an annealing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnealRecord<C> {
    /// The wandering state after iteration `iteration`, which is not
    /// necessarily the best one seen.
    Step {
        iteration: usize,
        temperature: f64,
        state: f64,
        cost: C,
    },
    /// Emitted once, after the last step.
    Best { state: f64, cost: C },
}

/// Simulated annealing over a single real-valued state.
///
/// Runs lazily: each call to `next` performs one iteration, and the final
/// call yields the best state seen. Dropping the iterator stops the search.
/// The schedule is not validated here; a non-positive `t0` makes the
/// acceptance probability meaningless.
pub struct Annealer<L: Landscape> {
    landscape: L,
    rng: Rng,

    decay: f64,
    iterations: usize,

    iteration: usize,
    temperature: f64,
    state: f64,
    cost: L::Cost,
    best_state: f64,
    best_cost: L::Cost,
    finished: bool,
}

impl<L: Landscape> Annealer<L> {
    pub fn new(landscape: L, x0: f64, schedule: AnnealSchedule, rng: Rng) -> Self {
        let cost = landscape.evaluate(x0);
        Self {
            landscape,
            rng,
            decay: schedule.decay,
            iterations: schedule.iterations,
            iteration: 0,
            temperature: schedule.t0,
            state: x0,
            cost,
            best_state: x0,
            best_cost: cost,
            finished: false,
        }
    }

    pub fn landscape(&self) -> &L {
        &self.landscape
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn current(&self) -> (f64, L::Cost) {
        (self.state, self.cost)
    }

    /// Best state seen so far; valid at any point of the run.
    pub fn best(&self) -> (f64, L::Cost) {
        (self.best_state, self.best_cost)
    }

    #[inline(always)]
    fn step(&mut self) -> AnnealRecord<L::Cost> {
        let t = self.temperature;
        let new_state = self.landscape.propose(self.state, t, &mut self.rng);
        let new_cost = self.landscape.evaluate(new_state);

        // Squared difference, not the signed one of textbook Metropolis.
        let diff = new_cost.to_f64() - self.cost.to_f64();
        let delta = diff * diff;

        if new_cost < self.cost || (-delta / t).exp() > self.rng.f64() {
            self.state = new_state;
            self.cost = new_cost;

            if self.cost < self.best_cost {
                self.best_state = self.state;
                self.best_cost = self.cost;
            }
        }

        let record = AnnealRecord::Step {
            iteration: self.iteration,
            temperature: t,
            state: self.state,
            cost: self.cost,
        };

        self.temperature *= self.decay;
        self.iteration += 1;
        record
    }
}

impl<L: Landscape> Iterator for Annealer<L> {
    type Item = AnnealRecord<L::Cost>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.iteration < self.iterations {
            return Some(self.step());
        }
        self.finished = true;
        Some(AnnealRecord::Best {
            state: self.best_state,
            cost: self.best_cost,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        // Remaining steps plus the terminal record; a usize::MAX budget overflows.
        match (self.iterations - self.iteration).checked_add(1) {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl<L: Landscape> FusedIterator for Annealer<L> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parabola() -> FnLandscape<impl Fn(f64, f64, &mut Rng) -> f64, impl Fn(f64) -> f64> {
        FnLandscape::new(
            |x, t, rng: &mut Rng| mutation::gaussian(rng, x, t),
            |x: f64| (x - 3.0) * (x - 3.0),
        )
    }

    #[test]
    fn test_size_hint_counts_terminal_record() {
        let schedule = AnnealSchedule {
            t0: 1.0,
            decay: 0.9,
            iterations: 5,
        };
        let mut annealer = Annealer::new(parabola(), 0.0, schedule, Rng::with_seed(1));
        assert_eq!(annealer.size_hint(), (6, Some(6)));
        annealer.next();
        assert_eq!(annealer.size_hint(), (5, Some(5)));
        let rest: Vec<_> = annealer.by_ref().collect();
        assert_eq!(rest.len(), 5);
        assert_eq!(annealer.size_hint(), (0, Some(0)));
        assert!(annealer.next().is_none());
    }

    #[test]
    fn test_size_hint_survives_unbounded_budget() {
        let schedule = AnnealSchedule {
            t0: 1.0,
            decay: 0.99,
            iterations: usize::MAX,
        };
        let mut annealer = Annealer::new(parabola(), 0.0, schedule, Rng::with_seed(1));
        assert_eq!(annealer.size_hint(), (usize::MAX, None));

        // One step in, the count fits again.
        annealer.next();
        assert_eq!(annealer.size_hint(), (usize::MAX, Some(usize::MAX)));
    }

    #[test]
    fn test_temperature_decays_geometrically() {
        let schedule = AnnealSchedule {
            t0: 8.0,
            decay: 0.5,
            iterations: 3,
        };
        let temps: Vec<f64> = Annealer::new(parabola(), 0.0, schedule, Rng::with_seed(7))
            .filter_map(|r| match r {
                AnnealRecord::Step { temperature, .. } => Some(temperature),
                AnnealRecord::Best { .. } => None,
            })
            .collect();
        assert_eq!(temps, vec![8.0, 4.0, 2.0]);
    }

    #[test]
    fn test_best_accessor_tracks_minimum_mid_run() {
        let schedule = AnnealSchedule {
            t0: 2.0,
            decay: 0.99,
            iterations: 50,
        };
        let mut annealer = Annealer::new(parabola(), 0.0, schedule, Rng::with_seed(3));
        let mut lowest = 9.0f64;
        for _ in 0..20 {
            if let Some(AnnealRecord::Step { cost, .. }) = annealer.next() {
                lowest = lowest.min(cost);
            }
            assert_eq!(annealer.best().1, lowest);
        }
    }
}
