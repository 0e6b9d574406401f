// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Moderation workflow for user-submitted questions.
//!
//! Submitted questions enter the store as `Pending` and leave that state
//! exactly once: `Pending → Approved` makes a question sampler-visible
//! immediately, `Pending → Rejected` retains it for audit but keeps it
//! permanently invisible. Both outcomes are terminal.

use crate::error::CoreError;
use crate::store::QuestionStore;
use quizdeck_domain::{
    Answer, ApprovalState, Category, Difficulty, DomainError, PendingSubmission, Question,
    validate_question_fields,
};
use std::collections::HashSet;
use tracing::info;

/// Deduplicates category references in place, preserving first occurrence
/// order.
fn dedup_categories(question: &mut Question) {
    let mut seen: HashSet<i64> = HashSet::new();
    question.category_ids.retain(|id| seen.insert(*id));
}

/// Checks that every referenced category exists in the store.
fn validate_categories_exist<S>(store: &S, category_ids: &[i64]) -> Result<(), CoreError>
where
    S: QuestionStore,
{
    let rows: Vec<Category> = store.list_categories()?;
    let known: HashSet<i64> = rows.iter().map(|category| category.id).collect();
    for &category_id in category_ids {
        if !known.contains(&category_id) {
            return Err(DomainError::CategoryNotFound(category_id).into());
        }
    }
    Ok(())
}

/// Accepts a user-submitted question into the moderation queue.
///
/// The question's fields are validated and every referenced category must
/// exist; a question that fails validation never reaches `Pending` state.
///
/// # Arguments
///
/// * `store` - The question store
/// * `question` - The submitted question (any incoming approval state is
///   overridden to `Pending`)
///
/// # Returns
///
/// * `Ok(PendingSubmission)` with the persisted question
/// * `Err(CoreError)` if validation fails or the store is unreachable
///
/// # Errors
///
/// Returns an error if:
/// - A field constraint is violated (blank text, too few answers, no
///   correct answer, empty category set)
/// - A referenced category does not exist
/// - The store cannot be reached in time
pub fn submit<S>(store: &S, question: Question) -> Result<PendingSubmission, CoreError>
where
    S: QuestionStore,
{
    let mut question: Question = question;
    dedup_categories(&mut question);
    validate_question_fields(&question)?;
    validate_categories_exist(store, &question.category_ids)?;

    question.approval = ApprovalState::Pending;
    let saved: Question = store.save_question(question)?;
    info!(
        question_id = saved.id,
        submitter_id = %saved.submitter_id,
        "Question submitted for moderation"
    );

    Ok(PendingSubmission::new(saved)?)
}

/// Applies a terminal approval transition to a pending question.
fn transition<S>(store: &S, question_id: i64, target: ApprovalState) -> Result<Question, CoreError>
where
    S: QuestionStore,
{
    let question: Question = store
        .get_question(question_id)?
        .ok_or(DomainError::QuestionNotFound(question_id))?;

    if !question.approval.can_transition_to(target) {
        return Err(DomainError::InvalidTransition {
            from: question.approval,
            to: target,
        }
        .into());
    }

    let updated: Question = store
        .update_approval(question_id, target)?
        .ok_or(DomainError::QuestionNotFound(question_id))?;
    Ok(updated)
}

/// Approves a pending question.
///
/// On success the question becomes eligible for sampling immediately;
/// there is no caching layer to lag behind.
///
/// # Arguments
///
/// * `store` - The question store
/// * `question_id` - The pending question's identifier
///
/// # Errors
///
/// Returns an error if:
/// - The question does not exist (`QuestionNotFound`)
/// - The question is not pending (`InvalidTransition`)
/// - The store cannot be reached in time
pub fn approve<S>(store: &S, question_id: i64) -> Result<Question, CoreError>
where
    S: QuestionStore,
{
    let question: Question = transition(store, question_id, ApprovalState::Approved)?;
    info!(question_id, "Question approved");
    Ok(question)
}

/// Rejects a pending question.
///
/// Rejected questions are retained for audit but are permanently excluded
/// from sampling.
///
/// # Arguments
///
/// * `store` - The question store
/// * `question_id` - The pending question's identifier
///
/// # Errors
///
/// Returns an error if:
/// - The question does not exist (`QuestionNotFound`)
/// - The question is not pending (`InvalidTransition`)
/// - The store cannot be reached in time
pub fn reject<S>(store: &S, question_id: i64) -> Result<Question, CoreError>
where
    S: QuestionStore,
{
    let question: Question = transition(store, question_id, ApprovalState::Rejected)?;
    info!(question_id, "Question rejected");
    Ok(question)
}

/// Field updates applicable to a pending question.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUpdate {
    /// Replacement question text.
    pub text: Option<String>,
    /// Replacement difficulty.
    pub difficulty: Option<Difficulty>,
    /// Replacement category references.
    pub category_ids: Option<Vec<i64>>,
    /// Replacement answer set.
    pub answers: Option<Vec<Answer>>,
}

/// Updates a question that is still pending moderation.
///
/// The updated question is re-validated in full; resolved questions can
/// no longer be modified.
///
/// # Arguments
///
/// * `store` - The question store
/// * `question_id` - The pending question's identifier
/// * `update` - The fields to replace
///
/// # Errors
///
/// Returns an error if:
/// - The question does not exist (`QuestionNotFound`)
/// - The question is already resolved (`NotPending`)
/// - The updated fields violate a field constraint
/// - A referenced category does not exist
/// - The store cannot be reached in time
pub fn update_pending<S>(
    store: &S,
    question_id: i64,
    update: PendingUpdate,
) -> Result<Question, CoreError>
where
    S: QuestionStore,
{
    let mut question: Question = store
        .get_question(question_id)?
        .ok_or(DomainError::QuestionNotFound(question_id))?;

    if question.approval != ApprovalState::Pending {
        return Err(DomainError::NotPending {
            question_id,
            state: question.approval,
        }
        .into());
    }

    if let Some(text) = update.text {
        question.text = text;
    }
    if let Some(difficulty) = update.difficulty {
        question.difficulty = difficulty;
    }
    if let Some(category_ids) = update.category_ids {
        question.category_ids = category_ids;
    }
    if let Some(answers) = update.answers {
        question.answers = answers;
    }

    dedup_categories(&mut question);
    validate_question_fields(&question)?;
    validate_categories_exist(store, &question.category_ids)?;

    let saved: Question = store.save_question(question)?;
    info!(question_id = saved.id, "Pending question updated");
    Ok(saved)
}
