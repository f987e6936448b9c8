//! Metadata about one finished run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingodrill_core::mode::TestMode;

/// When and how a result was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub mode: TestMode,
    pub created_at: DateTime<Utc>,
    /// Time the learner spent, when known.
    #[serde(default)]
    pub elapsed_secs: Option<u64>,
}

impl RunSummary {
    pub fn new(mode: TestMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            created_at: Utc::now(),
            elapsed_secs: None,
        }
    }

    pub fn with_elapsed(mut self, secs: u64) -> Self {
        self.elapsed_secs = Some(secs);
        self
    }
}

/// Coarse rating of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    /// 80 and above is good, 60 and above fair.
    pub fn of(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Good
        } else if score >= 60 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::Poor => "Needs work",
        }
    }

    /// CSS class of the score card.
    pub fn class(&self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreBand::Good => "#22c55e",
            ScoreBand::Fair => "#eab308",
            ScoreBand::Poor => "#ef4444",
        }
    }
}
