// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unique question sampling.
//!
//! Draws a bounded, randomized question set for a requesting identity,
//! excluding everything that identity has already been delivered. The
//! random source is injected by the caller, never taken from process-wide
//! state, so draws are reproducible under a seeded generator.

use crate::category_tree::expand_to_descendants;
use crate::error::CoreError;
use crate::history::HistoryStore;
use crate::store::QuestionStore;
use quizdeck_domain::{Answer, Category, Difficulty, Question};
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

/// A request for a unique question set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRequest {
    /// The requesting identity.
    pub user_id: String,
    /// Requested category ids; empty means "all categories". Selecting a
    /// parent category includes all of its descendants' questions.
    pub category_ids: Vec<i64>,
    /// Maximum number of questions to return.
    pub count: usize,
    /// Difficulty filter; `None` means any difficulty.
    pub difficulties: Option<HashSet<Difficulty>>,
    /// Whether answers are shaped for single-answer delivery.
    pub single_answer_mode: bool,
}

/// A question shaped for delivery.
///
/// This is a per-request view, distinct from the canonical `Question`,
/// so delivery shaping never mutates stored entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredQuestion {
    /// The question's identifier.
    pub question_id: i64,
    /// The question text.
    pub text: String,
    /// Difficulty classification.
    pub difficulty: Difficulty,
    /// The shaped answer set: all answers in stored order, or exactly the
    /// correct answer in single-answer mode.
    pub answers: Vec<Answer>,
}

/// The result of a successful sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledSet {
    /// The sampled questions. May hold fewer than the requested count
    /// when the pool cannot satisfy it; callers must check the size.
    pub questions: Vec<DeliveredQuestion>,
    /// Whether this call reset the user's delivery history because the
    /// eligible pool was exhausted.
    pub rotation_reset: bool,
}

/// Samples a unique question set for a user.
///
/// The pipeline expands the requested categories to their descendant set,
/// queries the store for the eligible pool, subtracts the user's delivery
/// history, and draws uniformly without replacement. A user who has seen
/// the entire eligible pool triggers a one-time history reset followed by
/// a resample from the full pool; this never loops.
///
/// # Arguments
///
/// * `store` - The question store
/// * `history` - The per-user delivery history
/// * `rng` - The injected random source
/// * `request` - The sample request
///
/// # Returns
///
/// * `Ok(SampledSet)` with up to `request.count` distinct questions
/// * `Err(CoreError)` if the pool is empty or the store fails
///
/// # Errors
///
/// Returns an error if:
/// - No approved question matches the category/difficulty filters
///   (`NoEligibleQuestions`)
/// - A selected question has no correct answer in single-answer mode
///   (`NoCorrectAnswer`)
/// - The store cannot be reached in time (`Store`)
pub fn sample<S, R>(
    store: &S,
    history: &HistoryStore,
    rng: &mut R,
    request: &SampleRequest,
) -> Result<SampledSet, CoreError>
where
    S: QuestionStore,
    R: Rng + ?Sized,
{
    let category_filter: Option<HashSet<i64>> = if request.category_ids.is_empty() {
        None
    } else {
        let rows: Vec<Category> = store.list_categories()?;
        let requested: HashSet<i64> = request.category_ids.iter().copied().collect();
        Some(expand_to_descendants(&requested, &rows))
    };

    let eligible: Vec<Question> =
        store.list_approved_questions(category_filter.as_ref(), request.difficulties.as_ref())?;
    if eligible.is_empty() {
        return Err(CoreError::NoEligibleQuestions);
    }

    let seen: HashSet<i64> = history.seen(&request.user_id);
    let unseen: Vec<&Question> = eligible
        .iter()
        .filter(|question| !seen.contains(&question.id))
        .collect();

    let mut rotation_reset: bool = false;
    let pool: Vec<&Question> = if unseen.is_empty() {
        // Exhausted rotation: the user has seen the whole eligible pool.
        // Reset once and resample from the full pool; never loop.
        warn!(
            user_id = %request.user_id,
            pool_size = eligible.len(),
            "Eligible pool exhausted, resetting delivery history"
        );
        history.reset(&request.user_id);
        rotation_reset = true;
        eligible.iter().collect()
    } else {
        unseen
    };

    let amount: usize = request.count.min(pool.len());
    let mut questions: Vec<DeliveredQuestion> = Vec::with_capacity(amount);
    let mut delivered_ids: Vec<i64> = Vec::with_capacity(amount);
    for index in rand::seq::index::sample(rng, pool.len(), amount) {
        let question: &Question = pool[index];
        questions.push(shape_for_delivery(question, request.single_answer_mode)?);
        delivered_ids.push(question.id);
    }

    if !delivered_ids.is_empty() {
        history.record_seen(&request.user_id, delivered_ids);
    }

    Ok(SampledSet {
        questions,
        rotation_reset,
    })
}

/// Shapes a question's answer set for delivery.
///
/// Multi-answer mode returns all answers in stored order. Single-answer
/// mode returns exactly the first correct answer and discards the rest.
fn shape_for_delivery(
    question: &Question,
    single_answer_mode: bool,
) -> Result<DeliveredQuestion, CoreError> {
    let answers: Vec<Answer> = if single_answer_mode {
        let correct: &Answer =
            question
                .first_correct_answer()
                .ok_or(CoreError::NoCorrectAnswer {
                    question_id: question.id,
                })?;
        vec![correct.clone()]
    } else {
        question.answers.clone()
    };

    Ok(DeliveredQuestion {
        question_id: question.id,
        text: question.text.clone(),
        difficulty: question.difficulty,
        answers,
    })
}
