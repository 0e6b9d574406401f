// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use quizdeck::{InMemoryStore, QuestionFilter, QuestionStore, StoreError};
use quizdeck_domain::{Answer, ApprovalState, Category, Difficulty, Question};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use time::OffsetDateTime;

use crate::{SubmitQuestionRequest, SubmittedAnswer, UniqueQuestionsRequest};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Store pre-seeded with a small hierarchy:
/// 1 Science (root), 2 Physics (child of 1), 3 Quantum (child of 2),
/// 4 History (root).
pub fn store_with_categories() -> InMemoryStore {
    let store: InMemoryStore = InMemoryStore::new();
    store
        .save_category(Category::new(String::from("Science"), None))
        .unwrap();
    store
        .save_category(Category::new(String::from("Physics"), Some(1)))
        .unwrap();
    store
        .save_category(Category::new(String::from("Quantum"), Some(2)))
        .unwrap();
    store
        .save_category(Category::new(String::from("History"), None))
        .unwrap();
    store
}

/// Persists an already-approved question, bypassing the moderation
/// workflow. Test setup only.
pub fn seed_approved_question(
    store: &InMemoryStore,
    text: &str,
    category_ids: Vec<i64>,
) -> Question {
    let mut question: Question = Question::new(
        String::from(text),
        Difficulty::Easy,
        category_ids,
        vec![
            Answer::new(String::from("Paris"), true),
            Answer::new(String::from("Lyon"), false),
        ],
        String::from("seeder"),
        OffsetDateTime::UNIX_EPOCH,
    );
    question.approval = ApprovalState::Approved;
    store.save_question(question).unwrap()
}

pub fn create_valid_submit_request() -> SubmitQuestionRequest {
    SubmitQuestionRequest {
        text: String::from("What is the speed of light?"),
        difficulty: String::from("Medium"),
        category_ids: vec![2],
        answers: vec![
            SubmittedAnswer {
                text: String::from("299,792 km/s"),
                is_correct: true,
            },
            SubmittedAnswer {
                text: String::from("150,000 km/s"),
                is_correct: false,
            },
        ],
        submitter_id: String::from("user-1"),
    }
}

pub fn create_sample_request(user_id: &str, count: usize) -> UniqueQuestionsRequest {
    UniqueQuestionsRequest {
        user_id: user_id.to_string(),
        number_of_questions: count,
        category_ids: Vec::new(),
        difficulties: Vec::new(),
        is_single_answer_mode: false,
    }
}

fn timeout(operation: &str) -> StoreError {
    StoreError::Timeout {
        operation: operation.to_string(),
    }
}

/// Store double whose every operation fails with a timeout.
pub struct TimeoutStore;

impl QuestionStore for TimeoutStore {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Err(timeout("list_categories"))
    }

    fn save_category(&self, _category: Category) -> Result<Category, StoreError> {
        Err(timeout("save_category"))
    }

    fn get_question(&self, _id: i64) -> Result<Option<Question>, StoreError> {
        Err(timeout("get_question"))
    }

    fn list_approved_questions(
        &self,
        _category_ids: Option<&HashSet<i64>>,
        _difficulties: Option<&HashSet<Difficulty>>,
    ) -> Result<Vec<Question>, StoreError> {
        Err(timeout("list_approved_questions"))
    }

    fn list_questions(&self, _filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        Err(timeout("list_questions"))
    }

    fn save_question(&self, _question: Question) -> Result<Question, StoreError> {
        Err(timeout("save_question"))
    }

    fn update_approval(
        &self,
        _id: i64,
        _state: ApprovalState,
    ) -> Result<Option<Question>, StoreError> {
        Err(timeout("update_approval"))
    }
}
