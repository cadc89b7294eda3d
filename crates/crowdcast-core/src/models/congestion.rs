use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CrowdcastError;

/// Discrete congestion level of a venue.
///
/// Declaration order is the classifier's class order: `Low = 0`,
/// `Medium = 1`, `High = 2`. Tie-breaks that iterate [`CongestionLevel::ALL`]
/// therefore favour the lower level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl CongestionLevel {
    /// Every level in class-index order.
    pub const ALL: [CongestionLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Class index used by the classifier.
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Inverse of [`CongestionLevel::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical lowercase code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Interpret a label as entered on a visit report.
    ///
    /// Accepts the canonical codes in any case and the localized display
    /// labels visitors pick in the app. Anything else, including a missing
    /// label, reads as `Medium`.
    pub fn from_report_label(label: Option<&str>) -> Self {
        let Some(raw) = label else {
            return Self::Medium;
        };
        let trimmed = raw.trim();
        match trimmed {
            "여유" => return Self::Low,
            "보통" => return Self::Medium,
            "혼잡" => return Self::High,
            _ => {}
        }
        trimmed.parse().unwrap_or(Self::Medium)
    }

    /// Classify a busyness percentage with the default 30/60 thresholds.
    /// A missing percentage is `Medium`.
    pub fn from_percent(percent: Option<u8>) -> Self {
        Self::from_percent_with(percent, 30, 60)
    }

    /// Classify a busyness percentage: `< low_below` is `Low`,
    /// `>= high_from` is `High`, everything between is `Medium`.
    pub fn from_percent_with(percent: Option<u8>, low_below: u8, high_from: u8) -> Self {
        match percent {
            None => Self::Medium,
            Some(p) if p < low_below => Self::Low,
            Some(p) if p >= high_from => Self::High,
            Some(_) => Self::Medium,
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CongestionLevel {
    type Err = CrowdcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CrowdcastError::InvalidLabel {
                label: s.to_string(),
            }),
        }
    }
}
