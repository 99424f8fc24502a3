//! Caption fader: scroll percentage -> per-caption opacity.
//!
//! Visibility is decided on the coarse caption bucket `floor(percent / 5)`.
//! Opacity flips between 0 and 1; there is no transition.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracker::ScrollProgress;

/// Which caption buckets show a caption.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketRule {
    /// Visible for any of the listed divisions.
    AnyOf(Vec<i64>),
    /// Visible for every division `>= n`.
    AtLeast(i64),
}

impl BucketRule {
    pub fn matches(&self, division: i64) -> bool {
        match self {
            BucketRule::AnyOf(list) => list.contains(&division),
            BucketRule::AtLeast(n) => division >= *n,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    /// Host element id.
    pub id: String,
    pub rule: BucketRule,
}

/// Ordered caption rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTable {
    pub captions: Vec<Caption>,
}

impl CaptionTable {
    /// Five captions over buckets 0–1, 5–6, 10–11, 15–16 and 18 onwards.
    pub fn showcase() -> Self {
        let rules = [
            BucketRule::AnyOf(vec![0, 1]),
            BucketRule::AnyOf(vec![5, 6]),
            BucketRule::AnyOf(vec![10, 11]),
            BucketRule::AnyOf(vec![15, 16]),
            BucketRule::AtLeast(18),
        ];
        Self {
            captions: rules
                .into_iter()
                .enumerate()
                .map(|(i, rule)| Caption {
                    id: format!("para{}", i + 1),
                    rule,
                })
                .collect(),
        }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Recompute every caption opacity from scratch.
    pub fn opacities(&self, progress: ScrollProgress) -> Vec<f32> {
        let division = progress.division();
        self.captions
            .iter()
            .map(|c| match division {
                Some(d) if c.rule.matches(d) => 1.0,
                _ => 0.0,
            })
            .collect()
    }

    /// Index of the first visible caption, if any.
    pub fn visible(&self, progress: ScrollProgress) -> Option<usize> {
        let division = progress.division()?;
        self.captions.iter().position(|c| c.rule.matches(division))
    }
}

impl Default for CaptionTable {
    fn default() -> Self {
        Self::showcase()
    }
}
