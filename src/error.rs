use thiserror::Error;

/// Which of the two obstacles a sample sequence or density belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Obstacle {
    One,
    Two,
}

impl std::fmt::Display for Obstacle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Obstacle::One => write!(f, "obstacle 1"),
            Obstacle::Two => write!(f, "obstacle 2"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvolveError {
    #[error("no observed times were supplied for {0}")]
    EmptySamples(Obstacle),

    #[error("observed time {value} for {obstacle} must be a positive finite number")]
    InvalidTime { obstacle: Obstacle, value: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("target probability {0} must lie strictly between 0 and 1")]
    InvalidProbability(f64),

    #[error("could not read {field}: {token:?} is not a number")]
    NotANumber { field: &'static str, token: String },

    #[error("uniform bounds for obstacle 1 collapse to a single point ({lower} == {upper})")]
    DegenerateDistribution { lower: f64, upper: f64 },

    #[error("exponential rate {0} must be positive and finite")]
    InvalidRate(f64),

    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),
}

/// Soft warning: the cumulative distribution never reaches the requested
/// probability, so the search result is only a lower bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnreachableTarget {
    pub target: f64,
    pub reached: f64,
}

impl std::fmt::Display for UnreachableTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "target probability {:.2} is never reached; the cumulative distribution peaks at {:.4}",
            self.target, self.reached
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvolveError>;
