// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler tests for unique question sampling and delivery history.

use quizdeck::{HistoryStore, InMemoryStore};
use rand::rngs::StdRng;
use std::collections::HashSet;

use crate::{
    ApiError, RecordHistoryRequest, RecordHistoryResponse, ResetHistoryResponse,
    UniqueQuestionsRequest, UniqueQuestionsResponse, record_history, reset_history,
    sample_unique_questions,
};

use super::helpers::{
    TimeoutStore, create_sample_request, seed_approved_question, seeded_rng, store_with_categories,
};

#[test]
fn test_sample_returns_requested_count() {
    let store: InMemoryStore = store_with_categories();
    for index in 0..5 {
        seed_approved_question(&store, &format!("Question {index}"), vec![1]);
    }
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 3);
    let response: UniqueQuestionsResponse =
        sample_unique_questions(&store, &history, &mut rng, &request).unwrap();

    assert_eq!(response.questions.len(), 3);
    assert!(!response.rotation_reset);
    let ids: HashSet<i64> = response
        .questions
        .iter()
        .map(|question| question.question_id)
        .collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_sample_excludes_previously_recorded_questions() {
    let store: InMemoryStore = store_with_categories();
    for index in 0..5 {
        seed_approved_question(&store, &format!("Question {index}"), vec![1]);
    }
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let record: RecordHistoryRequest = RecordHistoryRequest {
        user_id: String::from("user-1"),
        question_ids: vec![1, 2],
    };
    record_history(&history, &record).unwrap();

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 10);
    let response: UniqueQuestionsResponse =
        sample_unique_questions(&store, &history, &mut rng, &request).unwrap();

    // Only questions 3, 4 and 5 remain unseen.
    assert_eq!(response.questions.len(), 3);
    for question in &response.questions {
        assert!(!record.question_ids.contains(&question.question_id));
    }
}

#[test]
fn test_sample_partial_result_is_not_an_error() {
    let store: InMemoryStore = store_with_categories();
    seed_approved_question(&store, "Only question", vec![1]);
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 10);
    let response: UniqueQuestionsResponse =
        sample_unique_questions(&store, &history, &mut rng, &request).unwrap();

    assert_eq!(response.questions.len(), 1);
}

#[test]
fn test_sample_empty_pool_fails() {
    let store: InMemoryStore = store_with_categories();
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 3);
    let result: Result<UniqueQuestionsResponse, ApiError> =
        sample_unique_questions(&store, &history, &mut rng, &request);

    assert_eq!(result.unwrap_err(), ApiError::NoEligibleQuestions);
}

#[test]
fn test_sample_exhausted_pool_triggers_rotation_reset() {
    let store: InMemoryStore = store_with_categories();
    for index in 0..3 {
        seed_approved_question(&store, &format!("Question {index}"), vec![1]);
    }
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    history.record_seen("user-1", vec![1, 2, 3]);

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 2);
    let response: UniqueQuestionsResponse =
        sample_unique_questions(&store, &history, &mut rng, &request).unwrap();

    assert!(response.rotation_reset);
    assert_eq!(response.questions.len(), 2);
}

#[test]
fn test_sample_single_answer_mode_returns_only_the_correct_answer() {
    let store: InMemoryStore = store_with_categories();
    seed_approved_question(&store, "Capital of France?", vec![1]);
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let mut request: UniqueQuestionsRequest = create_sample_request("user-1", 1);
    request.is_single_answer_mode = true;
    let response: UniqueQuestionsResponse =
        sample_unique_questions(&store, &history, &mut rng, &request).unwrap();

    assert_eq!(response.questions.len(), 1);
    let answers = &response.questions[0].answers;
    assert_eq!(answers.len(), 1);
    assert!(answers[0].is_correct);
}

#[test]
fn test_sample_rejects_blank_user_id() {
    let store: InMemoryStore = store_with_categories();
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let request: UniqueQuestionsRequest = create_sample_request("  ", 3);
    let result: Result<UniqueQuestionsResponse, ApiError> =
        sample_unique_questions(&store, &history, &mut rng, &request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "user_id"
    ));
}

#[test]
fn test_sample_rejects_zero_count() {
    let store: InMemoryStore = store_with_categories();
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 0);
    let result: Result<UniqueQuestionsResponse, ApiError> =
        sample_unique_questions(&store, &history, &mut rng, &request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "number_of_questions"
    ));
}

#[test]
fn test_sample_rejects_unknown_difficulty() {
    let store: InMemoryStore = store_with_categories();
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let mut request: UniqueQuestionsRequest = create_sample_request("user-1", 3);
    request.difficulties = vec![String::from("Impossible")];
    let result: Result<UniqueQuestionsResponse, ApiError> =
        sample_unique_questions(&store, &history, &mut rng, &request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "difficulty"
    ));
}

#[test]
fn test_sample_store_timeout_surfaces_as_timeout() {
    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();

    let request: UniqueQuestionsRequest = create_sample_request("user-1", 3);
    let result: Result<UniqueQuestionsResponse, ApiError> =
        sample_unique_questions(&TimeoutStore, &history, &mut rng, &request);

    assert!(matches!(result.unwrap_err(), ApiError::Timeout { .. }));
}

#[test]
fn test_record_history_is_an_idempotent_union() {
    let history: HistoryStore = HistoryStore::new();

    let first: RecordHistoryRequest = RecordHistoryRequest {
        user_id: String::from("user-1"),
        question_ids: vec![1, 2],
    };
    let second: RecordHistoryRequest = RecordHistoryRequest {
        user_id: String::from("user-1"),
        question_ids: vec![2, 3],
    };
    record_history(&history, &first).unwrap();
    let response: RecordHistoryResponse = record_history(&history, &second).unwrap();

    assert_eq!(response.seen_count, 3);
    assert_eq!(history.seen("user-1"), HashSet::from([1, 2, 3]));
}

#[test]
fn test_record_history_rejects_blank_user_id() {
    let history: HistoryStore = HistoryStore::new();

    let request: RecordHistoryRequest = RecordHistoryRequest {
        user_id: String::new(),
        question_ids: vec![1],
    };
    let result: Result<RecordHistoryResponse, ApiError> = record_history(&history, &request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "user_id"
    ));
}

#[test]
fn test_reset_history_clears_the_record() {
    let history: HistoryStore = HistoryStore::new();
    history.record_seen("user-1", vec![1, 2, 3]);

    let response: ResetHistoryResponse = reset_history(&history, "user-1").unwrap();

    assert_eq!(response.user_id, "user-1");
    assert!(history.seen("user-1").is_empty());
}
