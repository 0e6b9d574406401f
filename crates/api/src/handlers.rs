// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for sampling, history, categories, moderation
//! and listing operations.
//!
//! Each handler translates its request DTO into domain types, invokes the
//! engine against the caller-supplied collaborators, and translates any
//! error to an [`ApiError`]. Inner errors never cross the boundary raw.

use std::collections::HashSet;
use std::str::FromStr;

use quizdeck::{
    CategoryNode, HistoryStore, Page, PageRequest, PendingUpdate, QuestionFilter, QuestionStore,
    SampleRequest, SampledSet, build_tree, query_questions, sample,
};
use quizdeck_domain::{Answer, ApprovalState, Category, Difficulty, PendingSubmission, Question};
use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AnswerInfo, CategoryNodeInfo, CategoryResponse, CategoryTreeResponse, CreateCategoryRequest,
    DeliveredQuestionInfo, ListQuestionsRequest, ListQuestionsResponse, ModerationResponse,
    QuestionSummary, RecordHistoryRequest, RecordHistoryResponse, ResetHistoryResponse,
    SubmitQuestionRequest, SubmitQuestionResponse, SubmittedAnswer, UniqueQuestionsRequest,
    UniqueQuestionsResponse, UpdateCategoryRequest, UpdatePendingRequest,
};

/// Rejects blank identity strings before they reach the engine.
fn validate_identity(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("Identity cannot be empty"),
        });
    }
    Ok(())
}

/// Parses a difficulty filter from its wire representation.
///
/// An empty list means "any difficulty" and maps to no filter at all.
fn parse_difficulties(values: &[String]) -> Result<Option<HashSet<Difficulty>>, ApiError> {
    if values.is_empty() {
        return Ok(None);
    }
    let mut difficulties: HashSet<Difficulty> = HashSet::with_capacity(values.len());
    for value in values {
        difficulties.insert(Difficulty::from_str(value).map_err(translate_domain_error)?);
    }
    Ok(Some(difficulties))
}

fn answers_to_info(answers: &[Answer]) -> Vec<AnswerInfo> {
    answers
        .iter()
        .map(|answer| AnswerInfo {
            answer_id: answer.id,
            text: answer.text.clone(),
            is_correct: answer.is_correct,
        })
        .collect()
}

fn submitted_answers_to_domain(answers: &[SubmittedAnswer]) -> Vec<Answer> {
    answers
        .iter()
        .map(|answer| Answer::new(answer.text.clone(), answer.is_correct))
        .collect()
}

fn question_to_summary(question: &Question) -> QuestionSummary {
    QuestionSummary {
        question_id: question.id,
        text: question.text.clone(),
        difficulty: question.difficulty.to_string(),
        approval: question.approval.to_string(),
        category_ids: question.category_ids.clone(),
        submitter_id: question.submitter_id.clone(),
        answers: answers_to_info(&question.answers),
    }
}

fn node_to_info(node: &CategoryNode) -> CategoryNodeInfo {
    CategoryNodeInfo {
        category_id: node.category.id,
        name: node.category.name.clone(),
        parent_id: node.category.parent_id,
        children: node.children.iter().map(node_to_info).collect(),
    }
}

/// Samples a unique question set for a user.
///
/// # Arguments
///
/// * `store` - The question store
/// * `history` - The per-user delivery history
/// * `rng` - The injected random source
/// * `request` - The API request
///
/// # Returns
///
/// * `Ok(UniqueQuestionsResponse)` with up to the requested number of
///   questions; callers must check the returned size
/// * `Err(ApiError)` if the request is invalid, the pool is empty, or the
///   store fails
///
/// # Errors
///
/// Returns an error if:
/// - The user id is blank or the question count is zero
/// - A difficulty value is not recognized
/// - No approved question matches the filters (`NoEligibleQuestions`)
/// - The store cannot be reached in time (`Timeout`)
pub fn sample_unique_questions<S, R>(
    store: &S,
    history: &HistoryStore,
    rng: &mut R,
    request: &UniqueQuestionsRequest,
) -> Result<UniqueQuestionsResponse, ApiError>
where
    S: QuestionStore,
    R: Rng + ?Sized,
{
    info!(
        user_id = %request.user_id,
        count = request.number_of_questions,
        single_answer_mode = request.is_single_answer_mode,
        "Handling unique questions request"
    );

    validate_identity("user_id", &request.user_id)?;
    if request.number_of_questions == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("number_of_questions"),
            message: String::from("At least one question must be requested"),
        });
    }

    let difficulties: Option<HashSet<Difficulty>> = parse_difficulties(&request.difficulties)?;

    let sample_request: SampleRequest = SampleRequest {
        user_id: request.user_id.clone(),
        category_ids: request.category_ids.clone(),
        count: request.number_of_questions,
        difficulties,
        single_answer_mode: request.is_single_answer_mode,
    };

    let sampled: SampledSet =
        sample(store, history, rng, &sample_request).map_err(translate_core_error)?;

    let questions: Vec<DeliveredQuestionInfo> = sampled
        .questions
        .iter()
        .map(|question| DeliveredQuestionInfo {
            question_id: question.question_id,
            text: question.text.clone(),
            difficulty: question.difficulty.to_string(),
            answers: answers_to_info(&question.answers),
        })
        .collect();

    Ok(UniqueQuestionsResponse {
        questions,
        rotation_reset: sampled.rotation_reset,
    })
}

/// Records delivered question ids for a user.
///
/// Recording is an idempotent union merge; repeating ids is a no-op.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the user id is blank.
pub fn record_history(
    history: &HistoryStore,
    request: &RecordHistoryRequest,
) -> Result<RecordHistoryResponse, ApiError> {
    info!(
        user_id = %request.user_id,
        count = request.question_ids.len(),
        "Handling record history request"
    );

    validate_identity("user_id", &request.user_id)?;
    history.record_seen(&request.user_id, request.question_ids.iter().copied());

    let seen_count: usize = history.seen(&request.user_id).len();
    Ok(RecordHistoryResponse {
        user_id: request.user_id.clone(),
        seen_count,
        message: format!(
            "Recorded {} question(s) for user '{}'",
            request.question_ids.len(),
            request.user_id
        ),
    })
}

/// Clears the delivery history of a user.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the user id is blank.
pub fn reset_history(history: &HistoryStore, user_id: &str) -> Result<ResetHistoryResponse, ApiError> {
    info!(user_id = %user_id, "Handling reset history request");

    validate_identity("user_id", user_id)?;
    history.reset(user_id);

    Ok(ResetHistoryResponse {
        user_id: user_id.to_string(),
        message: format!("Delivery history cleared for user '{user_id}'"),
    })
}

/// Returns the category hierarchy as nested payloads.
///
/// # Errors
///
/// Returns an error if the store cannot be reached in time.
pub fn get_category_tree<S>(store: &S) -> Result<CategoryTreeResponse, ApiError>
where
    S: QuestionStore,
{
    info!("Handling category tree request");

    let rows: Vec<Category> = store
        .list_categories()
        .map_err(|err| translate_core_error(err.into()))?;
    let tree: Vec<CategoryNode> = build_tree(&rows);

    Ok(CategoryTreeResponse {
        categories: tree.iter().map(node_to_info).collect(),
    })
}

/// Creates a category.
///
/// # Errors
///
/// Returns an error if:
/// - The name is invalid
/// - The parent does not exist
/// - The store cannot be reached in time
pub fn create_category<S>(
    store: &S,
    request: &CreateCategoryRequest,
) -> Result<CategoryResponse, ApiError>
where
    S: QuestionStore,
{
    info!(name = %request.name, parent_id = ?request.parent_id, "Handling create category request");

    let category: Category =
        quizdeck::create_category(store, request.name.clone(), request.parent_id)
            .map_err(translate_core_error)?;

    Ok(CategoryResponse {
        category_id: category.id,
        name: category.name.clone(),
        parent_id: category.parent_id,
        message: format!("Created category '{}'", category.name),
    })
}

/// Renames and/or reparents a category.
///
/// Reparenting is validated with a full ancestor walk; an assignment that
/// would close a cycle is rejected before it reaches the store.
///
/// # Errors
///
/// Returns an error if:
/// - No field to update was provided
/// - The name is invalid, or the category or new parent does not exist
/// - The assignment would create a cycle (`acyclic_categories`)
/// - The store cannot be reached in time
pub fn update_category<S>(
    store: &S,
    category_id: i64,
    request: &UpdateCategoryRequest,
) -> Result<CategoryResponse, ApiError>
where
    S: QuestionStore,
{
    info!(category_id, "Handling update category request");

    let reparent: bool = request.clear_parent || request.parent_id.is_some();
    if request.name.is_none() && !reparent {
        return Err(ApiError::InvalidInput {
            field: String::from("request"),
            message: String::from("Provide a new name, a new parent, or clear_parent"),
        });
    }

    let mut category: Option<Category> = None;
    if let Some(name) = &request.name {
        category = Some(
            quizdeck::rename_category(store, category_id, name.clone())
                .map_err(translate_core_error)?,
        );
    }
    if reparent {
        let new_parent: Option<i64> = if request.clear_parent {
            None
        } else {
            request.parent_id
        };
        category = Some(
            quizdeck::reparent_category(store, category_id, new_parent)
                .map_err(translate_core_error)?,
        );
    }

    // One of the two branches ran, so the category is always present.
    let category: Category = category.ok_or_else(|| ApiError::Internal {
        message: String::from("Category update produced no result"),
    })?;

    Ok(CategoryResponse {
        category_id: category.id,
        name: category.name.clone(),
        parent_id: category.parent_id,
        message: format!("Updated category '{}'", category.name),
    })
}

/// Submits a question for moderation.
///
/// The question enters the store in `Pending` state; a question that
/// fails validation never reaches the moderation queue.
///
/// # Errors
///
/// Returns an error if:
/// - The submitter id is blank or the difficulty is not recognized
/// - A field constraint is violated (blank text, too few answers, no
///   correct answer, empty category set)
/// - A referenced category does not exist
/// - The store cannot be reached in time
pub fn submit_question<S>(
    store: &S,
    request: &SubmitQuestionRequest,
) -> Result<SubmitQuestionResponse, ApiError>
where
    S: QuestionStore,
{
    info!(
        submitter_id = %request.submitter_id,
        category_count = request.category_ids.len(),
        "Handling submit question request"
    );

    validate_identity("submitter_id", &request.submitter_id)?;
    let difficulty: Difficulty =
        Difficulty::from_str(&request.difficulty).map_err(translate_domain_error)?;

    let question: Question = Question::new(
        request.text.clone(),
        difficulty,
        request.category_ids.clone(),
        submitted_answers_to_domain(&request.answers),
        request.submitter_id.clone(),
        OffsetDateTime::now_utc(),
    );

    let submission: PendingSubmission =
        quizdeck::submit(store, question).map_err(translate_core_error)?;

    Ok(SubmitQuestionResponse {
        question_id: submission.question.id,
        approval: submission.question.approval.to_string(),
        message: format!(
            "Question {} submitted for moderation",
            submission.question.id
        ),
    })
}

/// Approves a pending question, making it immediately sampler-visible.
///
/// # Errors
///
/// Returns an error if:
/// - The question does not exist (`ResourceNotFound`)
/// - The question is not pending (`InvalidState`)
/// - The store cannot be reached in time
pub fn approve_question<S>(store: &S, question_id: i64) -> Result<ModerationResponse, ApiError>
where
    S: QuestionStore,
{
    info!(question_id, "Handling approve question request");

    let question: Question = quizdeck::approve(store, question_id).map_err(translate_core_error)?;

    Ok(ModerationResponse {
        question_id: question.id,
        approval: question.approval.to_string(),
        message: format!("Question {} approved", question.id),
    })
}

/// Rejects a pending question, permanently excluding it from sampling.
///
/// # Errors
///
/// Returns an error if:
/// - The question does not exist (`ResourceNotFound`)
/// - The question is not pending (`InvalidState`)
/// - The store cannot be reached in time
pub fn reject_question<S>(store: &S, question_id: i64) -> Result<ModerationResponse, ApiError>
where
    S: QuestionStore,
{
    info!(question_id, "Handling reject question request");

    let question: Question = quizdeck::reject(store, question_id).map_err(translate_core_error)?;

    Ok(ModerationResponse {
        question_id: question.id,
        approval: question.approval.to_string(),
        message: format!("Question {} rejected", question.id),
    })
}

/// Updates a question that is still pending moderation.
///
/// # Errors
///
/// Returns an error if:
/// - The question does not exist (`ResourceNotFound`)
/// - The question is already resolved (`InvalidState`)
/// - A replacement field violates a constraint
/// - The store cannot be reached in time
pub fn update_pending_question<S>(
    store: &S,
    question_id: i64,
    request: &UpdatePendingRequest,
) -> Result<ModerationResponse, ApiError>
where
    S: QuestionStore,
{
    info!(question_id, "Handling update pending question request");

    let difficulty: Option<Difficulty> = match &request.difficulty {
        Some(value) => Some(Difficulty::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };

    let update: PendingUpdate = PendingUpdate {
        text: request.text.clone(),
        difficulty,
        category_ids: request.category_ids.clone(),
        answers: request
            .answers
            .as_ref()
            .map(|answers| submitted_answers_to_domain(answers)),
    };

    let question: Question =
        quizdeck::update_pending(store, question_id, update).map_err(translate_core_error)?;

    Ok(ModerationResponse {
        question_id: question.id,
        approval: question.approval.to_string(),
        message: format!("Question {} updated", question.id),
    })
}

/// Returns one page of a filtered question listing.
///
/// Requesting a page beyond the last yields an empty item list with the
/// correct totals; that is not an error.
///
/// # Errors
///
/// Returns an error if:
/// - The page number or page size is zero
/// - The approval filter is not recognized
/// - The store cannot be reached in time
pub fn list_questions<S>(
    store: &S,
    request: &ListQuestionsRequest,
) -> Result<ListQuestionsResponse, ApiError>
where
    S: QuestionStore,
{
    info!(
        page = request.page,
        page_size = request.page_size,
        "Handling list questions request"
    );

    let approval: Option<ApprovalState> = match &request.approval {
        Some(value) => Some(ApprovalState::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };

    let filter: QuestionFilter = QuestionFilter {
        approval,
        submitter: request.submitter.clone(),
        category_id: request.category_id,
    };
    let page_request: PageRequest =
        PageRequest::new(request.page, request.page_size).map_err(translate_domain_error)?;

    let page: Page<Question> =
        query_questions(store, &filter, &page_request).map_err(translate_core_error)?;

    Ok(ListQuestionsResponse {
        items: page.items.iter().map(question_to_summary).collect(),
        total_count: page.total_count,
        page_size: page.page_size,
        total_pages: page.total_pages,
    })
}
