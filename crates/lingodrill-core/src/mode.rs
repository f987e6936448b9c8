//! Test mode presets offered by the mode selector.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::quiz::paced::DEFAULT_SESSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestMode {
    /// Short mixed test under the session timer.
    QuickTest,
    /// Full-length mixed exam under the session timer.
    ClassicExam,
    #[serde(rename = "challenge-mode")]
    Challenge,
    TimeAttack,
    /// One random reading unit and its questions.
    RandomReading,
}

impl TestMode {
    pub const ALL: [TestMode; 5] = [
        TestMode::QuickTest,
        TestMode::ClassicExam,
        TestMode::Challenge,
        TestMode::TimeAttack,
        TestMode::RandomReading,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TestMode::QuickTest => "quick-test",
            TestMode::ClassicExam => "classic-exam",
            TestMode::Challenge => "challenge-mode",
            TestMode::TimeAttack => "time-attack",
            TestMode::RandomReading => "random-reading",
        }
    }

    pub fn question_count(self) -> usize {
        match self {
            TestMode::QuickTest => 10,
            TestMode::ClassicExam | TestMode::Challenge | TestMode::TimeAttack => 50,
            TestMode::RandomReading => crate::reading::QUESTIONS_PER_TEST,
        }
    }

    /// Session-wide countdown, for the modes that have one.
    pub fn session_duration(self) -> Option<Duration> {
        match self {
            TestMode::QuickTest | TestMode::ClassicExam => Some(DEFAULT_SESSION),
            _ => None,
        }
    }

    /// Whether questions come from the mixed composite generator.
    pub fn uses_generator(self) -> bool {
        !matches!(self, TestMode::RandomReading)
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TestMode::ALL
            .into_iter()
            .find(|m| m.id() == wanted || m.id().trim_end_matches("-mode") == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = TestMode::ALL.iter().map(|m| m.id()).collect();
                format!("unknown test mode '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
