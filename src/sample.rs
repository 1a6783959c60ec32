use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;
use statrs::statistics::Statistics;

use crate::error::{ConvolveError, Obstacle, Result};

/// Observed completion times for both obstacles of one design, plus the
/// confidence level the caller wants the threshold for.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSummary {
    obstacle1_times: Vec<f64>,
    obstacle2_times: Vec<f64>,
    mean1: f64,
    mean2: f64,
    target_probability: f64,
}

impl SampleSummary {
    pub fn new(
        target_probability: f64,
        obstacle1_times: Vec<f64>,
        obstacle2_times: Vec<f64>,
    ) -> Result<Self> {
        if !(target_probability > 0.0 && target_probability < 1.0) {
            return Err(ConvolveError::InvalidProbability(target_probability));
        }
        check_times(Obstacle::One, &obstacle1_times)?;
        check_times(Obstacle::Two, &obstacle2_times)?;

        let mean1 = mean(&obstacle1_times)?;
        let mean2 = mean(&obstacle2_times)?;
        Ok(SampleSummary {
            obstacle1_times,
            obstacle2_times,
            mean1,
            mean2,
            target_probability,
        })
    }

    pub fn obstacle1_times(&self) -> &[f64] {
        &self.obstacle1_times
    }

    pub fn obstacle2_times(&self) -> &[f64] {
        &self.obstacle2_times
    }

    pub fn mean1(&self) -> f64 {
        self.mean1
    }

    pub fn mean2(&self) -> f64 {
        self.mean2
    }

    pub fn target_probability(&self) -> f64 {
        self.target_probability
    }

    /// (min, max) of the obstacle 1 observations, the support of its uniform model.
    pub fn obstacle1_bounds(&self) -> (f64, f64) {
        // non-empty is checked at construction
        bounds(&self.obstacle1_times).unwrap_or((self.mean1, self.mean1))
    }
}

fn check_times(obstacle: Obstacle, times: &[f64]) -> Result<()> {
    if times.is_empty() {
        return Err(ConvolveError::EmptySamples(obstacle));
    }
    match times.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
        Some(&value) => Err(ConvolveError::InvalidTime { obstacle, value }),
        None => Ok(()),
    }
}

/// Arithmetic mean, `sum(times) / len(times)`.
pub fn mean(times: &[f64]) -> Result<f64> {
    if times.is_empty() {
        return Err(ConvolveError::InvalidInput(
            "mean of an empty sequence is undefined".to_string(),
        ));
    }
    Ok(times.iter().mean())
}

/// Returns `(min, max)`. A single distinct value yields `min == max`; the
/// uniform density built on such bounds is degenerate and rejected downstream.
pub fn bounds(times: &[f64]) -> Result<(f64, f64)> {
    match times.iter().copied().map(OrderedFloat).minmax() {
        MinMaxResult::NoElements => Err(ConvolveError::InvalidInput(
            "bounds of an empty sequence are undefined".to_string(),
        )),
        MinMaxResult::OneElement(only) => Ok((only.0, only.0)),
        MinMaxResult::MinMax(lo, hi) => Ok((lo.0, hi.0)),
    }
}
