use serde::{Deserialize, Serialize};

/// Aggregate statistics for one history channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
}

impl ChannelStats {
    /// Compute stats over a channel's values. Returns `None` for an empty
    /// channel rather than a fabricated zero result.
    pub fn over(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for value in values {
            count += 1;
            sum += value;
            max = max.max(value);
            min = min.min(value);
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            avg: sum / count as f64,
            max,
            min,
        })
    }
}

/// On-demand summary over the current history contents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub cpu: ChannelStats,
    pub memory: ChannelStats,
    pub disk: ChannelStats,
    /// Number of collection cycles currently retained
    pub samples: usize,
}
