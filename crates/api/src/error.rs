// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use quizdeck::{CoreError, StoreError};
use quizdeck_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation is not allowed in the resource's current state.
    InvalidState {
        /// A human-readable description of the state conflict.
        message: String,
    },
    /// No approved question matches the requested filters.
    NoEligibleQuestions,
    /// The storage collaborator did not respond within its deadline.
    Timeout {
        /// The store operation that timed out.
        operation: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidState { message } => {
                write!(f, "Invalid state: {message}")
            }
            Self::NoEligibleQuestions => {
                write!(
                    f,
                    "No approved questions match the requested categories and difficulties"
                )
            }
            Self::Timeout { operation } => {
                write!(f, "Store operation '{operation}' timed out")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCategoryName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidQuestionText(msg) => ApiError::InvalidInput {
            field: String::from("text"),
            message: msg,
        },
        DomainError::InvalidAnswerText { index, message } => ApiError::InvalidInput {
            field: String::from("answers"),
            message: format!("Answer at position {index}: {message}"),
        },
        DomainError::TooFewAnswers { count } => ApiError::InvalidInput {
            field: String::from("answers"),
            message: format!("A question needs at least 2 answers, got {count}"),
        },
        DomainError::NoCorrectAnswer => ApiError::DomainRuleViolation {
            rule: String::from("correct_answer_required"),
            message: String::from("A question must have at least one correct answer"),
        },
        DomainError::EmptyCategorySet => ApiError::InvalidInput {
            field: String::from("category_ids"),
            message: String::from("A question must belong to at least one category"),
        },
        DomainError::CategoryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Category"),
            message: format!("Category {id} does not exist"),
        },
        DomainError::QuestionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Question"),
            message: format!("Question {id} does not exist"),
        },
        DomainError::HierarchyCycle {
            category_id,
            parent_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("acyclic_categories"),
            message: format!(
                "Category {parent_id} cannot become the parent of category {category_id}: the hierarchy would no longer be acyclic"
            ),
        },
        DomainError::InvalidTransition { from, to } => ApiError::InvalidState {
            message: format!("Approval transition {from} -> {to} is not permitted"),
        },
        DomainError::NotPending { question_id, state } => ApiError::InvalidState {
            message: format!(
                "Question {question_id} is {state}, only pending questions can be modified"
            ),
        },
        DomainError::InvalidDifficulty(value) => ApiError::InvalidInput {
            field: String::from("difficulty"),
            message: format!("Invalid difficulty: '{value}'. Must be 'Easy', 'Medium' or 'Hard'"),
        },
        DomainError::InvalidApprovalState(value) => ApiError::InvalidInput {
            field: String::from("approval"),
            message: format!(
                "Invalid approval state: '{value}'. Must be 'Pending', 'Approved' or 'Rejected'"
            ),
        },
        DomainError::InvalidPageNumber { page } => ApiError::InvalidInput {
            field: String::from("page"),
            message: format!("Invalid page number: {page}. Must be at least 1"),
        },
        DomainError::InvalidPageSize { size } => ApiError::InvalidInput {
            field: String::from("page_size"),
            message: format!("Invalid page size: {size}. Must be at least 1"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoEligibleQuestions => ApiError::NoEligibleQuestions,
        CoreError::NoCorrectAnswer { question_id } => ApiError::DomainRuleViolation {
            rule: String::from("correct_answer_required"),
            message: format!("Question {question_id} has no correct answer to deliver"),
        },
        CoreError::Store(store_err) => match store_err {
            StoreError::Timeout { operation } => ApiError::Timeout { operation },
            StoreError::Unavailable { message } => ApiError::Internal {
                message: format!("Store backend unavailable: {message}"),
            },
        },
    }
}
