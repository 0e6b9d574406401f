// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_question, seeded_rng, store_with_categories};
use crate::{
    CoreError, HistoryStore, InMemoryStore, PendingUpdate, QuestionFilter, QuestionStore,
    SampleRequest, approve, reject, sample, submit, update_pending,
};
use quizdeck_domain::{
    Answer, ApprovalState, Difficulty, DomainError, PendingSubmission, Question,
};
use rand::rngs::StdRng;

fn submit_test_question(store: &InMemoryStore) -> Question {
    submit(store, create_test_question("Capital of France?", vec![1]))
        .unwrap()
        .question
}

#[test]
fn test_submit_persists_a_pending_question() {
    let store: InMemoryStore = store_with_categories();

    let submission: PendingSubmission =
        submit(&store, create_test_question("Capital of France?", vec![1])).unwrap();

    assert!(submission.question.id > 0);
    assert_eq!(submission.question.approval, ApprovalState::Pending);

    let stored: Question = store.get_question(submission.question.id).unwrap().unwrap();
    assert_eq!(stored.approval, ApprovalState::Pending);
}

#[test]
fn test_submit_assigns_answer_ids() {
    let store: InMemoryStore = store_with_categories();

    let submission: PendingSubmission =
        submit(&store, create_test_question("Capital of France?", vec![1])).unwrap();

    assert!(submission.question.answers.iter().all(|answer| answer.id > 0));
}

#[test]
fn test_submit_deduplicates_category_references() {
    let store: InMemoryStore = store_with_categories();

    let submission: PendingSubmission = submit(
        &store,
        create_test_question("Capital of France?", vec![1, 2, 1, 2]),
    )
    .unwrap();

    assert_eq!(submission.question.category_ids, vec![1, 2]);
}

#[test]
fn test_submit_without_correct_answer_never_reaches_pending() {
    let store: InMemoryStore = store_with_categories();
    let mut question: Question = create_test_question("Capital of France?", vec![1]);
    question.answers = vec![
        Answer::new(String::from("Lyon"), false),
        Answer::new(String::from("Marseille"), false),
    ];

    let result: Result<PendingSubmission, CoreError> = submit(&store, question);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NoCorrectAnswer))
    ));
    // Nothing was persisted.
    let stored: Vec<Question> = store.list_questions(&QuestionFilter::default()).unwrap();
    assert!(stored.is_empty());
}

#[test]
fn test_submit_with_unknown_category_fails() {
    let store: InMemoryStore = store_with_categories();

    let result: Result<PendingSubmission, CoreError> =
        submit(&store, create_test_question("Capital of France?", vec![99]));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::CategoryNotFound(99)))
    ));
}

#[test]
fn test_approve_flips_state() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);

    let approved: Question = approve(&store, question.id).unwrap();

    assert_eq!(approved.approval, ApprovalState::Approved);
}

#[test]
fn test_approved_question_is_immediately_samplable() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);
    approve(&store, question.id).unwrap();

    let history: HistoryStore = HistoryStore::new();
    let mut rng: StdRng = seeded_rng();
    let request: SampleRequest = SampleRequest {
        user_id: String::from("user-1"),
        category_ids: vec![1],
        count: 1,
        difficulties: None,
        single_answer_mode: false,
    };

    let result = sample(&store, &history, &mut rng, &request).unwrap();
    assert_eq!(result.questions[0].question_id, question.id);
}

#[test]
fn test_approve_missing_question_fails() {
    let store: InMemoryStore = store_with_categories();

    let result: Result<Question, CoreError> = approve(&store, 99);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::QuestionNotFound(99)))
    ));
}

#[test]
fn test_approve_after_reject_fails() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);
    reject(&store, question.id).unwrap();

    let result: Result<Question, CoreError> = approve(&store, question.id);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTransition {
            from: ApprovalState::Rejected,
            to: ApprovalState::Approved,
        }))
    ));
}

#[test]
fn test_approve_twice_fails() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);
    approve(&store, question.id).unwrap();

    let result: Result<Question, CoreError> = approve(&store, question.id);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTransition { .. }
        ))
    ));
}

#[test]
fn test_rejected_question_is_retained_but_invisible() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);

    let rejected: Question = reject(&store, question.id).unwrap();
    assert_eq!(rejected.approval, ApprovalState::Rejected);

    // Retained for audit.
    assert!(store.get_question(question.id).unwrap().is_some());
    // Never sampler-visible.
    let approved: Vec<Question> = store.list_approved_questions(None, None).unwrap();
    assert!(approved.is_empty());
}

#[test]
fn test_update_pending_replaces_fields() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);

    let update: PendingUpdate = PendingUpdate {
        text: Some(String::from("Capital of Spain?")),
        difficulty: Some(Difficulty::Hard),
        category_ids: Some(vec![4]),
        answers: Some(vec![
            Answer::new(String::from("Madrid"), true),
            Answer::new(String::from("Barcelona"), false),
        ]),
    };

    let updated: Question = update_pending(&store, question.id, update).unwrap();

    assert_eq!(updated.text, "Capital of Spain?");
    assert_eq!(updated.difficulty, Difficulty::Hard);
    assert_eq!(updated.category_ids, vec![4]);
    assert_eq!(updated.approval, ApprovalState::Pending);
}

#[test]
fn test_update_after_resolution_fails() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);
    approve(&store, question.id).unwrap();

    let update: PendingUpdate = PendingUpdate {
        text: Some(String::from("Too late")),
        ..PendingUpdate::default()
    };
    let result: Result<Question, CoreError> = update_pending(&store, question.id, update);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotPending {
            state: ApprovalState::Approved,
            ..
        }))
    ));
}

#[test]
fn test_update_is_revalidated() {
    let store: InMemoryStore = store_with_categories();
    let question: Question = submit_test_question(&store);

    let update: PendingUpdate = PendingUpdate {
        answers: Some(vec![Answer::new(String::from("Only one"), true)]),
        ..PendingUpdate::default()
    };
    let result: Result<Question, CoreError> = update_pending(&store, question.id, update);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TooFewAnswers { count: 1 }
        ))
    ));
    // The stored question is untouched.
    let stored: Question = store.get_question(question.id).unwrap().unwrap();
    assert_eq!(stored.answers.len(), 2);
}

#[test]
fn test_update_missing_question_fails() {
    let store: InMemoryStore = store_with_categories();

    let result: Result<Question, CoreError> =
        update_pending(&store, 42, PendingUpdate::default());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::QuestionNotFound(42)))
    ));
}
