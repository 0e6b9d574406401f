// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use quizdeck_domain::DomainError;

/// Errors that can occur in the selection and moderation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No approved question matches the requested category and difficulty
    /// filters, even before history subtraction.
    NoEligibleQuestions,
    /// A question selected for single-answer delivery has no correct
    /// answer to deliver.
    NoCorrectAnswer {
        /// The offending question.
        question_id: i64,
    },
    /// The storage collaborator failed.
    Store(StoreError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoEligibleQuestions => {
                write!(
                    f,
                    "No approved questions match the requested categories and difficulties"
                )
            }
            Self::NoCorrectAnswer { question_id } => {
                write!(f, "Question {question_id} has no correct answer to deliver")
            }
            Self::Store(err) => write!(f, "Store failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
