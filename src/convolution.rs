use tracing::warn;

use crate::error::UnreachableTarget;

/// Discrete convolution, `out[n] = sum_k f[k] * g[n - k]` over every `k`
/// where both indices are in range. Output length is `len(f) + len(g) - 1`,
/// or zero when either input is empty.
pub fn convolve(f: &[f64], g: &[f64]) -> Vec<f64> {
    if f.is_empty() || g.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; f.len() + g.len() - 1];
    for (n, slot) in out.iter_mut().enumerate() {
        // k ranges over max(0, n - len(g) + 1)..=min(n, len(f) - 1)
        let k_lo = (n + 1).saturating_sub(g.len());
        let k_hi = n.min(f.len() - 1);
        let mut sum = 0.0;
        for k in k_lo..=k_hi {
            sum += f[k] * g[n - k];
        }
        *slot = sum;
    }
    out
}

/// Running prefix sum; same length as the input.
pub fn cumulative_sum(sequence: &[f64]) -> Vec<f64> {
    sequence
        .iter()
        .scan(0.0, |acc, x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Outcome of a percentile search over a cumulative sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThresholdSearch {
    /// position in index space, within `tolerance` below the first index
    /// whose cumulative value reaches the target
    pub index: f64,
    pub unreachable: Option<UnreachableTarget>,
}

impl ThresholdSearch {
    pub fn is_exact(&self) -> bool {
        self.unreachable.is_none()
    }
}

/// Bisects the continuous index range `[0, len - 1]` for the smallest `x`
/// with `cumulative[floor(x)] >= target`, stopping once the bracket is no
/// wider than `tolerance` (or than the float spacing at that point), and
/// returns the lower end of the bracket.
///
/// `cumulative` must be non-decreasing. If the target is above the last
/// value, the bracket closes on the last index and the result carries an
/// [`UnreachableTarget`] warning; the index itself is not adjusted.
pub fn search_threshold(cumulative: &[f64], target: f64, tolerance: f64) -> ThresholdSearch {
    let unreachable = match cumulative.last() {
        Some(&reached) if reached >= target => None,
        Some(&reached) => Some(UnreachableTarget { target, reached }),
        None => Some(UnreachableTarget {
            target,
            reached: 0.0,
        }),
    };
    if let Some(w) = unreachable {
        warn!(
            requested = w.target,
            reached = w.reached,
            "target probability is never reached on this grid"
        );
    }

    let mut low = 0.0f64;
    let mut high = cumulative.len().saturating_sub(1) as f64;
    while high - low > tolerance {
        let mid = (low + high) / 2.0;
        // bracket narrower than float spacing cannot shrink further
        if mid <= low || mid >= high {
            break;
        }
        if cumulative[mid.floor() as usize] < target {
            low = mid;
        } else {
            high = mid;
        }
    }

    ThresholdSearch {
        index: low,
        unreachable,
    }
}
