//! Episode feedback values.

use serde::{Deserialize, Serialize};

/// Feedback a user can leave on a watched episode.
///
/// Wire format: the SCREAMING_SNAKE_CASE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feedback {
    Helpful,
    NotHelpful,
}

impl Feedback {
    pub const ALL: [Feedback; 2] = [Feedback::Helpful, Feedback::NotHelpful];

    pub fn name(self) -> &'static str {
        match self {
            Feedback::Helpful => "HELPFUL",
            Feedback::NotHelpful => "NOT_HELPFUL",
        }
    }

    /// Total parse from the wire name. Returns `None` outside the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}
