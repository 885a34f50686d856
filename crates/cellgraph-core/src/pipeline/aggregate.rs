//! Reduce per-file reports to one verdict.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::model::Report;

/// Overall outcome of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Verdict {
    AllValid,
    SomeInvalid,
    /// No documents were supplied. Distinct from success.
    NoInput,
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::AllValid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllValid => "all_valid",
            Self::SomeInvalid => "some_invalid",
            Self::NoInput => "no_input",
        }
    }
}

/// `AllValid` iff every report is valid; `NoInput` for an empty batch.
pub fn aggregate(reports: &[Report]) -> Verdict {
    if reports.is_empty() {
        Verdict::NoInput
    } else if reports.iter().all(Report::is_valid) {
        Verdict::AllValid
    } else {
        Verdict::SomeInvalid
    }
}
