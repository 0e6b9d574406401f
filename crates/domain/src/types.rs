// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Difficulty classification of a question.
///
/// The ordering is meaningful: `Easy < Medium < Hard`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Difficulty {
    /// Entry-level questions.
    #[default]
    Easy,
    /// Questions requiring some familiarity with the topic.
    Medium,
    /// Questions for experienced users.
    Hard,
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            _ => Err(DomainError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Difficulty {
    /// Converts this difficulty to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Moderation state of a question.
///
/// Only `Approved` questions are visible to the sampler. `Rejected`
/// questions are retained for audit but never delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApprovalState {
    /// Submitted and awaiting moderation.
    #[default]
    Pending,
    /// Published. Visible to the sampler.
    Approved,
    /// Declined. Retained, never sampler-visible.
    Rejected,
}

impl FromStr for ApprovalState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApprovalState(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ApprovalState {
    /// Converts this approval state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Rejected
    ///
    /// Approved and Rejected are terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Returns whether this state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A node in the category hierarchy.
///
/// Categories form a tree through the nullable `parent_id` back-reference.
/// A category with `parent_id == None` is a root. The graph must stay
/// acyclic; reparent operations are validated with a full ancestor walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The canonical identifier assigned by the store. `0` indicates the
    /// category has not been persisted yet.
    pub id: i64,
    /// Display name, 1-100 characters.
    pub name: String,
    /// The parent category, or `None` for a root category.
    pub parent_id: Option<i64>,
}

impl Category {
    /// Creates a new `Category` without a persisted ID.
    #[must_use]
    pub const fn new(name: String, parent_id: Option<i64>) -> Self {
        Self {
            id: 0,
            name,
            parent_id,
        }
    }

    /// Creates a `Category` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(id: i64, name: String, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name,
            parent_id,
        }
    }

    /// Returns whether this category is a root of the hierarchy.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A single answer option owned by a question.
///
/// Answers live and die with their question; they are never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The canonical identifier assigned by the store. `0` indicates the
    /// answer has not been persisted yet.
    pub id: i64,
    /// Answer text, 1-500 characters.
    pub text: String,
    /// Whether this answer is correct.
    pub is_correct: bool,
}

impl Answer {
    /// Creates a new `Answer` without a persisted ID.
    #[must_use]
    pub const fn new(text: String, is_correct: bool) -> Self {
        Self {
            id: 0,
            text,
            is_correct,
        }
    }

    /// Creates an `Answer` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(id: i64, text: String, is_correct: bool) -> Self {
        Self {
            id,
            text,
            is_correct,
        }
    }
}

/// A quiz question with its ordered answer set.
///
/// Invariant: at least one answer has `is_correct == true`. Enforced by
/// `validate_question_fields` before a question enters the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The canonical identifier assigned by the store. `0` indicates the
    /// question has not been persisted yet.
    pub id: i64,
    /// The question text.
    pub text: String,
    /// Difficulty classification.
    pub difficulty: Difficulty,
    /// Categories this question belongs to (many-to-many).
    pub category_ids: Vec<i64>,
    /// Ordered answer options, two or more.
    pub answers: Vec<Answer>,
    /// Moderation state.
    pub approval: ApprovalState,
    /// Identity of the submitter.
    pub submitter_id: String,
    /// When the question was submitted.
    pub submitted_at: OffsetDateTime,
}

impl Question {
    /// Creates a new unpersisted question in `Pending` state.
    #[must_use]
    pub const fn new(
        text: String,
        difficulty: Difficulty,
        category_ids: Vec<i64>,
        answers: Vec<Answer>,
        submitter_id: String,
        submitted_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: 0,
            text,
            difficulty,
            category_ids,
            answers,
            approval: ApprovalState::Pending,
            submitter_id,
            submitted_at,
        }
    }

    /// Returns the first correct answer in stored order, if any.
    #[must_use]
    pub fn first_correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.is_correct)
    }

    /// Returns whether at least one answer is marked correct.
    #[must_use]
    pub fn has_correct_answer(&self) -> bool {
        self.first_correct_answer().is_some()
    }

    /// Returns whether this question is visible to the sampler.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }
}

/// A user-submitted question accepted into the moderation queue.
///
/// The wrapped question is always in `Pending` state at construction;
/// it leaves this shape when a moderator approves or rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    /// The submitted question, persisted with `Pending` approval.
    pub question: Question,
}

impl PendingSubmission {
    /// Wraps a pending question.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotPending` if the question is already
    /// resolved.
    pub fn new(question: Question) -> Result<Self, DomainError> {
        if question.approval != ApprovalState::Pending {
            return Err(DomainError::NotPending {
                question_id: question.id,
                state: question.approval,
            });
        }
        Ok(Self { question })
    }
}
