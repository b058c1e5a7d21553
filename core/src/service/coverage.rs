use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CoverageBand {
    #[serde(rename = "none")]
    NoTarget,
    Behind,
    Close,
    OnTrack,
}

impl CoverageBand {
    pub fn label(&self) -> &'static str {
        match self {
            CoverageBand::NoTarget => "no target",
            CoverageBand::Behind => "behind",
            CoverageBand::Close => "close",
            CoverageBand::OnTrack => "on track",
        }
    }
}

/// A ratio under `behind_below` is behind. Reaching `on_track_at` is on track;
/// anything between is close.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CoveragePolicy {
    pub behind_below: f64,
    pub on_track_at: f64,
}

impl CoveragePolicy {
    pub const SHORT_HORIZON: CoveragePolicy = CoveragePolicy {
        behind_below: 0.75,
        on_track_at: 0.90,
    };

    pub const PERIOD_TRACKING: CoveragePolicy = CoveragePolicy {
        behind_below: 0.95,
        on_track_at: 1.0,
    };

    pub fn classify(&self, ratio: Option<f64>) -> CoverageBand {
        match ratio {
            None => CoverageBand::NoTarget,
            Some(r) if r.is_nan() => CoverageBand::NoTarget,
            Some(r) if r < self.behind_below => CoverageBand::Behind,
            Some(r) if r < self.on_track_at => CoverageBand::Close,
            Some(_) => CoverageBand::OnTrack,
        }
    }
}

pub fn coverage_ratio(actual: f64, target: f64) -> Option<f64> {
    if target > 0.0 {
        Some(actual / target)
    } else {
        None
    }
}

pub fn classify(ratio: Option<f64>, policy: &CoveragePolicy) -> CoverageBand {
    policy.classify(ratio)
}
