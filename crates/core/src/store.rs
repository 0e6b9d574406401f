// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The repository contract against the question store, and an in-memory
//! implementation used by the server binary and the tests.

use quizdeck_domain::{ApprovalState, Category, Difficulty, Question};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Failures raised by the storage collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The operation did not complete within its deadline.
    #[error("Store operation '{operation}' exceeded its deadline")]
    Timeout {
        /// The operation that timed out.
        operation: String,
    },

    /// The backing store is unavailable.
    #[error("Store backend unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Filters for question listings.
///
/// Each field narrows the result set; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Match a specific approval state.
    pub approval: Option<ApprovalState>,
    /// Match questions submitted by a specific identity.
    pub submitter: Option<String>,
    /// Match questions belonging to a specific category.
    pub category_id: Option<i64>,
}

/// Read/write contract against the question store.
///
/// The relational store behind this trait is an external collaborator;
/// this trait captures its shape only. `save_*` operations assign a fresh
/// id when the entity arrives with `id == 0` and replace the stored row
/// otherwise.
pub trait QuestionStore {
    /// Lists all category rows.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Persists a category, assigning an id if it has none.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn save_category(&self, category: Category) -> Result<Category, StoreError>;

    /// Fetches a question by id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError>;

    /// Lists approved questions whose category set intersects
    /// `category_ids` (when given) and whose difficulty is in
    /// `difficulties` (when given).
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn list_approved_questions(
        &self,
        category_ids: Option<&HashSet<i64>>,
        difficulties: Option<&HashSet<Difficulty>>,
    ) -> Result<Vec<Question>, StoreError>;

    /// Lists questions matching a filter, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError>;

    /// Persists a question, assigning question and answer ids as needed.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn save_question(&self, question: Question) -> Result<Question, StoreError>;

    /// Sets the approval state of a question. Returns `None` when the
    /// question does not exist.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be reached in time.
    fn update_approval(
        &self,
        id: i64,
        state: ApprovalState,
    ) -> Result<Option<Question>, StoreError>;
}

/// Mutable interior of the in-memory store.
#[derive(Debug, Default)]
struct StoreInner {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    next_category_id: i64,
    next_question_id: i64,
    next_answer_id: i64,
}

/// In-memory question store.
///
/// Backs the server binary and the test suites. Every operation acquires
/// the inner lock with a deadline rather than blocking indefinitely; a
/// store wedged by a stuck writer surfaces `StoreError::Timeout` to the
/// caller instead of hanging the sample attempt.
#[derive(Debug)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
    deadline: Duration,
}

/// Default lock deadline for store operations.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

impl InMemoryStore {
    /// Creates an empty store with the default operation deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::with_deadline(DEFAULT_DEADLINE)
    }

    /// Creates an empty store with an explicit operation deadline.
    #[must_use]
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            deadline,
        }
    }

    /// Acquires the inner lock, giving up once the deadline elapses.
    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        let start: Instant = Instant::now();
        loop {
            match self.inner.try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => {
                    if start.elapsed() >= self.deadline {
                        return Err(StoreError::Timeout {
                            operation: operation.to_string(),
                        });
                    }
                    std::thread::yield_now();
                }
            }
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionStore for InMemoryStore {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let inner = self.lock("list_categories")?;
        Ok(inner.categories.values().cloned().collect())
    }

    fn save_category(&self, mut category: Category) -> Result<Category, StoreError> {
        let mut inner = self.lock("save_category")?;
        if category.id == 0 {
            inner.next_category_id += 1;
            category.id = inner.next_category_id;
        }
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }

    fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let inner = self.lock("get_question")?;
        Ok(inner.questions.get(&id).cloned())
    }

    fn list_approved_questions(
        &self,
        category_ids: Option<&HashSet<i64>>,
        difficulties: Option<&HashSet<Difficulty>>,
    ) -> Result<Vec<Question>, StoreError> {
        let inner = self.lock("list_approved_questions")?;
        Ok(inner
            .questions
            .values()
            .filter(|question| question.is_approved())
            .filter(|question| {
                category_ids.is_none_or(|wanted| {
                    question.category_ids.iter().any(|id| wanted.contains(id))
                })
            })
            .filter(|question| {
                difficulties.is_none_or(|wanted| wanted.contains(&question.difficulty))
            })
            .cloned()
            .collect())
    }

    fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        let inner = self.lock("list_questions")?;
        Ok(inner
            .questions
            .values()
            .filter(|question| {
                filter
                    .approval
                    .is_none_or(|state| question.approval == state)
            })
            .filter(|question| {
                filter
                    .submitter
                    .as_ref()
                    .is_none_or(|submitter| question.submitter_id == *submitter)
            })
            .filter(|question| {
                filter
                    .category_id
                    .is_none_or(|category_id| question.category_ids.contains(&category_id))
            })
            .cloned()
            .collect())
    }

    fn save_question(&self, mut question: Question) -> Result<Question, StoreError> {
        let mut inner = self.lock("save_question")?;
        if question.id == 0 {
            inner.next_question_id += 1;
            question.id = inner.next_question_id;
        }
        for answer in &mut question.answers {
            if answer.id == 0 {
                inner.next_answer_id += 1;
                answer.id = inner.next_answer_id;
            }
        }
        inner.questions.insert(question.id, question.clone());
        Ok(question)
    }

    fn update_approval(
        &self,
        id: i64,
        state: ApprovalState,
    ) -> Result<Option<Question>, StoreError> {
        let mut inner = self.lock("update_approval")?;
        Ok(inner.questions.get_mut(&id).map(|question| {
            question.approval = state;
            question.clone()
        }))
    }
}
