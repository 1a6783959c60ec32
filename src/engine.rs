use tracing::debug;

use crate::config::ModelConfig;
use crate::convolution::{convolve, cumulative_sum, search_threshold, ThresholdSearch};
use crate::density::{sample_exponential, sample_uniform};
use crate::error::{Result, UnreachableTarget};
use crate::sample::SampleSummary;

/// Distribution of the combined time over both obstacles.
///
/// Obstacle 1 is modelled as uniform on the observed `[min, max]`, obstacle 2
/// as exponential with rate `1 / mean2`. Both densities are sampled on the
/// same time grid, convolved to approximate the density of their sum, and
/// accumulated into a cumulative distribution that is searched for the time
/// at which the target probability is first reached.
///
/// The result is a Riemann-sum approximation on the grid; the cumulative
/// distribution is not normalised and need not end at exactly 1.
#[derive(Clone, Debug)]
pub struct ConvolutionEngine {
    summary: SampleSummary,
    config: ModelConfig,
    bounds: (f64, f64),
    rate: f64,
    density1: Vec<f64>,
    density2: Vec<f64>,
    joint_density: Vec<f64>,
    cumulative: Vec<f64>,
    threshold: ThresholdSearch,
}

impl ConvolutionEngine {
    pub fn new(summary: SampleSummary, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.time_grid();
        let step = config.grid_step;

        let (a, b) = summary.obstacle1_bounds();
        let density1 = sample_uniform(&grid, a, b)?;
        let rate = summary.mean2().recip();
        let density2 = sample_exponential(&grid, rate)?;

        let joint_density: Vec<f64> = convolve(&density1, &density2)
            .into_iter()
            .map(|x| x * step)
            .collect();
        let cumulative: Vec<f64> = cumulative_sum(&joint_density)
            .into_iter()
            .map(|x| x * step)
            .collect();
        let threshold = search_threshold(
            &cumulative,
            summary.target_probability(),
            config.tolerance,
        );

        debug!(
            grid_size = config.grid_size,
            grid_step = step,
            lower = a,
            upper = b,
            rate,
            total_mass = cumulative.last().copied().unwrap_or(0.0),
            threshold_index = threshold.index,
            "built combined time distribution"
        );

        Ok(ConvolutionEngine {
            summary,
            config,
            bounds: (a, b),
            rate,
            density1,
            density2,
            joint_density,
            cumulative,
            threshold,
        })
    }

    pub fn summary(&self) -> &SampleSummary {
        &self.summary
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn mean1(&self) -> f64 {
        self.summary.mean1()
    }

    pub fn mean2(&self) -> f64 {
        self.summary.mean2()
    }

    pub fn mean_total(&self) -> f64 {
        self.mean1() + self.mean2()
    }

    pub fn target_probability(&self) -> f64 {
        self.summary.target_probability()
    }

    /// Support of the obstacle 1 uniform model.
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Rate of the obstacle 2 exponential model.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn density1(&self) -> &[f64] {
        &self.density1
    }

    pub fn density2(&self) -> &[f64] {
        &self.density2
    }

    /// Density of the combined time at lags `0, step, ..., (2T - 2) * step`.
    pub fn joint_density(&self) -> &[f64] {
        &self.joint_density
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn threshold(&self) -> &ThresholdSearch {
        &self.threshold
    }

    /// Time below which the combined time falls with the target probability.
    pub fn threshold_time(&self) -> f64 {
        self.threshold.index * self.config.grid_step
    }

    pub fn unreachable(&self) -> Option<UnreachableTarget> {
        self.threshold.unreachable
    }
}
