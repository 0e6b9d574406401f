// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    approve_question, create_category, get_category_tree, list_questions, record_history,
    reject_question, reset_history, sample_unique_questions, submit_question, update_category,
    update_pending_question,
};
pub use request_response::{
    AnswerInfo, CategoryNodeInfo, CategoryResponse, CategoryTreeResponse, CreateCategoryRequest,
    DeliveredQuestionInfo, ListQuestionsRequest, ListQuestionsResponse, ModerationResponse,
    QuestionSummary, RecordHistoryRequest, RecordHistoryResponse, ResetHistoryResponse,
    SubmitQuestionRequest, SubmitQuestionResponse, SubmittedAnswer, UniqueQuestionsRequest,
    UniqueQuestionsResponse, UpdateCategoryRequest, UpdatePendingRequest,
};
