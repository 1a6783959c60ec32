pub mod config;
pub mod convolution;
pub mod density;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod sample;

pub use config::{ModelConfig, RunConfig, SampleInput};
pub use convolution::{convolve, cumulative_sum, search_threshold, ThresholdSearch};
pub use density::{exponential_density, uniform_density};
pub use engine::ConvolutionEngine;
pub use error::{ConvolveError, Obstacle, UnreachableTarget};
pub use report::Report;
pub use sample::{bounds, mean, SampleSummary};
