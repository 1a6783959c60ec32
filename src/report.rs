use std::fmt;

use crate::engine::ConvolutionEngine;
use crate::error::UnreachableTarget;

/// Human readable summary of one engine run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    pub mean1: f64,
    pub mean2: f64,
    pub threshold_time: f64,
    pub target_probability: f64,
    pub unreachable: Option<UnreachableTarget>,
}

impl Report {
    pub fn new(engine: &ConvolutionEngine) -> Self {
        Report {
            mean1: engine.mean1(),
            mean2: engine.mean2(),
            threshold_time: engine.threshold_time(),
            target_probability: engine.target_probability(),
            unreachable: engine.unreachable(),
        }
    }
}

impl From<&ConvolutionEngine> for Report {
    fn from(engine: &ConvolutionEngine) -> Self {
        Report::new(engine)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mean1 = {:.2}", self.mean1)?;
        writeln!(f, "mean2 = {:.2}", self.mean2)?;
        writeln!(f, "mean1 + mean2 = {:.2}", self.mean1 + self.mean2)?;
        writeln!(f, "The probability that two events will take less than t' < t:")?;
        write!(
            f,
            "Pr(t' < {:.1} s) = {:.2}",
            self.threshold_time, self.target_probability
        )?;
        if let Some(warning) = self.unreachable {
            write!(f, "\nwarning: {}; the time above is a lower bound", warning)?;
        }
        Ok(())
    }
}
