// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ApprovalState;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Category name is empty or out of bounds.
    InvalidCategoryName(String),
    /// Question text is empty or blank.
    InvalidQuestionText(String),
    /// An answer's text is empty or out of bounds.
    InvalidAnswerText {
        /// Zero-based position of the offending answer.
        index: usize,
        /// Description of the validation failure.
        message: String,
    },
    /// A question must carry at least two answers.
    TooFewAnswers {
        /// The number of answers provided.
        count: usize,
    },
    /// A question must have at least one correct answer.
    NoCorrectAnswer,
    /// A question must belong to at least one category.
    EmptyCategorySet,
    /// Category does not exist.
    CategoryNotFound(i64),
    /// Question does not exist.
    QuestionNotFound(i64),
    /// Reparenting would create a self-reference or a cycle in the
    /// category hierarchy.
    HierarchyCycle {
        /// The category being reparented.
        category_id: i64,
        /// The candidate parent that closes the cycle.
        parent_id: i64,
    },
    /// The requested approval transition is not permitted.
    InvalidTransition {
        /// The current state.
        from: ApprovalState,
        /// The requested state.
        to: ApprovalState,
    },
    /// The question is no longer pending, so the operation is not allowed.
    NotPending {
        /// The question identifier.
        question_id: i64,
        /// The question's current state.
        state: ApprovalState,
    },
    /// Difficulty string is not recognized.
    InvalidDifficulty(String),
    /// Approval state string is not recognized.
    InvalidApprovalState(String),
    /// Page number must be at least 1.
    InvalidPageNumber {
        /// The invalid page number.
        page: usize,
    },
    /// Page size must be at least 1.
    InvalidPageSize {
        /// The invalid page size.
        size: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategoryName(msg) => write!(f, "Invalid category name: {msg}"),
            Self::InvalidQuestionText(msg) => write!(f, "Invalid question text: {msg}"),
            Self::InvalidAnswerText { index, message } => {
                write!(f, "Invalid answer text at position {index}: {message}")
            }
            Self::TooFewAnswers { count } => {
                write!(f, "A question needs at least 2 answers, got {count}")
            }
            Self::NoCorrectAnswer => {
                write!(f, "A question must have at least one correct answer")
            }
            Self::EmptyCategorySet => {
                write!(f, "A question must belong to at least one category")
            }
            Self::CategoryNotFound(id) => write!(f, "Category {id} not found"),
            Self::QuestionNotFound(id) => write!(f, "Question {id} not found"),
            Self::HierarchyCycle {
                category_id,
                parent_id,
            } => {
                write!(
                    f,
                    "Cannot make category {parent_id} the parent of category {category_id}: the hierarchy would no longer be acyclic"
                )
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Approval transition {from} -> {to} is not permitted")
            }
            Self::NotPending { question_id, state } => {
                write!(
                    f,
                    "Question {question_id} is {state}, only pending questions can be modified"
                )
            }
            Self::InvalidDifficulty(value) => {
                write!(
                    f,
                    "Invalid difficulty: '{value}'. Must be 'Easy', 'Medium' or 'Hard'"
                )
            }
            Self::InvalidApprovalState(value) => {
                write!(
                    f,
                    "Invalid approval state: '{value}'. Must be 'Pending', 'Approved' or 'Rejected'"
                )
            }
            Self::InvalidPageNumber { page } => {
                write!(f, "Invalid page number: {page}. Must be at least 1")
            }
            Self::InvalidPageSize { size } => {
                write!(f, "Invalid page size: {size}. Must be at least 1")
            }
        }
    }
}

impl std::error::Error for DomainError {}
