// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{InMemoryStore, QuestionFilter, QuestionStore, StoreError};
use quizdeck_domain::{Answer, ApprovalState, Category, Difficulty, Question};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use time::OffsetDateTime;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn two_answers() -> Vec<Answer> {
    vec![
        Answer::new(String::from("Paris"), true),
        Answer::new(String::from("Lyon"), false),
    ]
}

pub fn create_test_question(text: &str, category_ids: Vec<i64>) -> Question {
    Question::new(
        String::from(text),
        Difficulty::Easy,
        category_ids,
        two_answers(),
        String::from("user-1"),
        OffsetDateTime::UNIX_EPOCH,
    )
}

/// Flat category rows used by the pure tree tests:
/// 1 Science (root), 2 Physics (child of 1), 3 Quantum (child of 2),
/// 4 History (root), 5 Biology (child of 1).
pub fn category_rows() -> Vec<Category> {
    vec![
        Category::with_id(1, String::from("Science"), None),
        Category::with_id(2, String::from("Physics"), Some(1)),
        Category::with_id(3, String::from("Quantum"), Some(2)),
        Category::with_id(4, String::from("History"), None),
        Category::with_id(5, String::from("Biology"), Some(1)),
    ]
}

/// Store pre-seeded with the `category_rows` hierarchy. Ids are assigned
/// sequentially, so they match the rows above.
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
        .save_category(Category::new(String::from("Biology"), Some(1)))
        .unwrap();
    store
}

/// Persists an already-approved question, bypassing the moderation
/// workflow. Test setup only.
pub fn seed_approved_question(
    store: &InMemoryStore,
    text: &str,
    category_ids: Vec<i64>,
    difficulty: Difficulty,
) -> Question {
    let mut question: Question = Question::new(
        String::from(text),
        difficulty,
        category_ids,
        two_answers(),
        String::from("seeder"),
        OffsetDateTime::UNIX_EPOCH,
    );
    question.approval = ApprovalState::Approved;
    store.save_question(question).unwrap()
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
