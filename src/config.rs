use crate::error::{RetimeError, RtResult};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub search: SolverParams,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Bucket width in milliseconds
    #[arg(long, default_value_t = 100)]
    pub unit: i64,
    /// Initial temperature (also the initial proposal spread, in ms)
    #[arg(long, default_value_t = 1000.0)]
    pub t0: f64,
    /// Cooling factor applied after every iteration. Derived from unit/t0 when omitted.
    #[arg(long)]
    pub decay: Option<f64>,
    #[arg(long, default_value_t = 100)]
    pub iterations: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Independent searches to run; the best one wins
    #[arg(long, default_value_t = 1)]
    pub restarts: usize,
    #[arg(long, default_value_t = false)]
    pub include_comments: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            unit: 100,
            t0: 1000.0,
            decay: None,
            iterations: 100,
            seed: None,
            restarts: 1,
            include_comments: false,
        }
    }
}

impl SolverParams {
    /// Rejects configurations the annealer cannot run with.
    pub fn validate(&self) -> RtResult<()> {
        if self.unit <= 0 {
            return Err(RetimeError::Config(format!(
                "unit must be positive, got {}",
                self.unit
            )));
        }
        if !self.t0.is_finite() || self.t0 <= 0.0 {
            return Err(RetimeError::Config(format!(
                "t0 must be a positive number, got {}",
                self.t0
            )));
        }
        let decay = self.effective_decay();
        if !decay.is_finite() || decay <= 0.0 || decay > 1.0 {
            let msg = match self.decay {
                Some(_) => format!("decay must lie in (0, 1], got {}", decay),
                None => format!(
                    "derived decay (unit/t0)^(1/iterations) = ({}/{})^(1/{}) = {} is outside (0, 1]; pass --decay or raise --t0 above --unit",
                    self.unit, self.t0, self.iterations, decay
                ),
            };
            return Err(RetimeError::Config(msg));
        }
        if self.restarts == 0 {
            return Err(RetimeError::Config(
                "restarts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn effective_decay(&self) -> f64 {
        self.decay
            .unwrap_or_else(|| derived_decay(self.unit, self.t0, self.iterations))
    }
}

/// Cooling factor that takes the temperature from `t0` down to roughly `unit`
/// over `iterations` steps.
///
/// With no iterations there is nothing to cool, so the factor is 1.
pub fn derived_decay(unit: i64, t0: f64, iterations: usize) -> f64 {
    if iterations == 0 {
        return 1.0;
    }
    (unit as f64 / t0).powf(1.0 / iterations as f64)
}
