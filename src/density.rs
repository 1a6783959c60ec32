use statrs::distribution::{Continuous, Exp};

use crate::error::{ConvolveError, Result};

/// Density of the uniform distribution on `[a, b]` evaluated at `t`.
///
/// Bounds that collapse (`a == b`) or are inverted have no density; this
/// returns `DegenerateDistribution` instead of an infinite value.
pub fn uniform_density(t: f64, a: f64, b: f64) -> Result<f64> {
    if !(b > a) {
        return Err(ConvolveError::DegenerateDistribution { lower: a, upper: b });
    }
    if a <= t && t <= b {
        Ok((b - a).recip())
    } else {
        Ok(0.0)
    }
}

/// Density of the exponential distribution with rate `r` at `t`, `r * exp(-r * t)`.
pub fn exponential_density(t: f64, r: f64) -> Result<f64> {
    Ok(exponential(r)?.pdf(t))
}

fn exponential(r: f64) -> Result<Exp> {
    if !(r.is_finite() && r > 0.0) {
        return Err(ConvolveError::InvalidRate(r));
    }
    Exp::new(r).map_err(|_| ConvolveError::InvalidRate(r))
}

/// Samples the uniform density at every grid point.
pub fn sample_uniform(grid: &[f64], a: f64, b: f64) -> Result<Vec<f64>> {
    grid.iter().map(|&t| uniform_density(t, a, b)).collect()
}

/// Samples the exponential density at every grid point.
pub fn sample_exponential(grid: &[f64], r: f64) -> Result<Vec<f64>> {
    let dist = exponential(r)?;
    Ok(grid.iter().map(|&t| dist.pdf(t)).collect())
}
