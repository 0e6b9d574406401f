// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Enumerated values cross the boundary as strings and are
//! parsed explicitly by the handlers.

/// API request for a unique question set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UniqueQuestionsRequest {
    /// The requesting identity.
    pub user_id: String,
    /// The maximum number of questions to deliver.
    pub number_of_questions: usize,
    /// Requested category ids. Empty means all categories; selecting a
    /// parent category includes all of its descendants.
    pub category_ids: Vec<i64>,
    /// Difficulty filter ('Easy', 'Medium', 'Hard'). Empty means any.
    pub difficulties: Vec<String>,
    /// Whether to deliver only the correct answer, without distractors.
    pub is_single_answer_mode: bool,
}

/// A single answer as it crosses the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerInfo {
    /// The answer's canonical identifier.
    pub answer_id: i64,
    /// The answer text.
    pub text: String,
    /// Whether this answer is correct.
    pub is_correct: bool,
}

/// A question shaped for delivery to a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeliveredQuestionInfo {
    /// The question's canonical identifier.
    pub question_id: i64,
    /// The question text.
    pub text: String,
    /// The difficulty classification.
    pub difficulty: String,
    /// The shaped answer set: all answers in stored order, or exactly the
    /// correct answer in single-answer mode.
    pub answers: Vec<AnswerInfo>,
}

/// API response for a unique question request.
///
/// The response may hold fewer questions than requested when the pool
/// cannot satisfy the request; callers must check the returned size.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UniqueQuestionsResponse {
    /// The delivered questions.
    pub questions: Vec<DeliveredQuestionInfo>,
    /// Whether this request reset the user's delivery history because the
    /// eligible pool was exhausted.
    pub rotation_reset: bool,
}

/// API request to record delivered question ids for a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordHistoryRequest {
    /// The identity the delivery belongs to.
    pub user_id: String,
    /// The delivered question ids.
    pub question_ids: Vec<i64>,
}

/// API response acknowledging a history recording.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordHistoryResponse {
    /// The identity the delivery belongs to.
    pub user_id: String,
    /// The total number of distinct questions the user has now seen.
    pub seen_count: usize,
    /// A success message.
    pub message: String,
}

/// API response acknowledging a history reset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResetHistoryResponse {
    /// The identity whose history was cleared.
    pub user_id: String,
    /// A success message.
    pub message: String,
}

/// A category with its child subtrees, for hierarchical payloads.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryNodeInfo {
    /// The category's canonical identifier.
    pub category_id: i64,
    /// The category name.
    pub name: String,
    /// The parent category, or `None` for a root.
    pub parent_id: Option<i64>,
    /// Child categories, ordered by name ascending.
    pub children: Vec<CategoryNodeInfo>,
}

/// API response carrying the full category hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryTreeResponse {
    /// The root categories with their subtrees.
    pub categories: Vec<CategoryNodeInfo>,
}

/// API request to create a category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateCategoryRequest {
    /// The category name (1-100 characters).
    pub name: String,
    /// The parent category, or `None` for a root.
    pub parent_id: Option<i64>,
}

/// API request to rename and/or reparent a category.
///
/// Omitted fields are left unchanged. Setting `clear_parent` moves the
/// category to the root of the hierarchy and takes precedence over
/// `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateCategoryRequest {
    /// Replacement name (1-100 characters).
    pub name: Option<String>,
    /// Replacement parent category.
    pub parent_id: Option<i64>,
    /// Make the category a root, discarding its current parent.
    #[serde(default)]
    pub clear_parent: bool,
}

/// API response for a category mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryResponse {
    /// The category's canonical identifier.
    pub category_id: i64,
    /// The category name.
    pub name: String,
    /// The parent category, or `None` for a root.
    pub parent_id: Option<i64>,
    /// A success message.
    pub message: String,
}

/// A single answer as submitted for moderation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmittedAnswer {
    /// The answer text (1-500 characters).
    pub text: String,
    /// Whether this answer is correct.
    pub is_correct: bool,
}

/// API request to submit a question for moderation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitQuestionRequest {
    /// The question text.
    pub text: String,
    /// The difficulty classification ('Easy', 'Medium', 'Hard').
    pub difficulty: String,
    /// The categories the question belongs to.
    pub category_ids: Vec<i64>,
    /// The ordered answer options, two or more, at least one correct.
    pub answers: Vec<SubmittedAnswer>,
    /// The submitting identity.
    pub submitter_id: String,
}

/// API response for a successful question submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitQuestionResponse {
    /// The canonical identifier assigned to the question.
    pub question_id: i64,
    /// The approval state ('Pending').
    pub approval: String,
    /// A success message.
    pub message: String,
}

/// API request to update a question that is still pending moderation.
///
/// Omitted fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdatePendingRequest {
    /// Replacement question text.
    pub text: Option<String>,
    /// Replacement difficulty ('Easy', 'Medium', 'Hard').
    pub difficulty: Option<String>,
    /// Replacement category references.
    pub category_ids: Option<Vec<i64>>,
    /// Replacement answer set.
    pub answers: Option<Vec<SubmittedAnswer>>,
}

/// API response for a moderation action.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModerationResponse {
    /// The question's canonical identifier.
    pub question_id: i64,
    /// The approval state after the action.
    pub approval: String,
    /// A success message.
    pub message: String,
}

/// API request for a paginated question listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListQuestionsRequest {
    /// The 1-based page number.
    pub page: usize,
    /// The number of items per page.
    pub page_size: usize,
    /// Approval state filter ('Pending', 'Approved', 'Rejected').
    pub approval: Option<String>,
    /// Restrict the listing to questions submitted by this identity.
    pub submitter: Option<String>,
    /// Restrict the listing to questions in this category.
    pub category_id: Option<i64>,
}

/// A question as it appears in a moderation or listing view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionSummary {
    /// The question's canonical identifier.
    pub question_id: i64,
    /// The question text.
    pub text: String,
    /// The difficulty classification.
    pub difficulty: String,
    /// The approval state.
    pub approval: String,
    /// The categories the question belongs to.
    pub category_ids: Vec<i64>,
    /// The submitting identity.
    pub submitter_id: String,
    /// The full answer set, including correctness, for moderation review.
    pub answers: Vec<AnswerInfo>,
}

/// API response for a paginated question listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListQuestionsResponse {
    /// The questions on this page. Empty when the page number lies beyond
    /// the last page; that is not an error.
    pub items: Vec<QuestionSummary>,
    /// Total number of matching questions across all pages.
    pub total_count: usize,
    /// The page size the listing was computed with.
    pub page_size: usize,
    /// Total number of pages.
    pub total_pages: usize,
}
