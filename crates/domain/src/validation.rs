// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Answer, Question};

/// Maximum length of a category name, in characters.
const MAX_CATEGORY_NAME_CHARS: usize = 100;

/// Maximum length of an answer text, in characters.
const MAX_ANSWER_TEXT_CHARS: usize = 500;

/// Minimum number of answers a question must carry.
const MIN_ANSWER_COUNT: usize = 2;

/// Validates a category name.
///
/// # Arguments
///
/// * `name` - The name to validate
///
/// # Returns
///
/// * `Ok(())` if the name is valid
/// * `Err(DomainError::InvalidCategoryName)` otherwise
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or longer than 100
/// characters.
pub fn validate_category_name(name: &str) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if name.trim().is_empty() {
        return Err(DomainError::InvalidCategoryName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: name must not exceed 100 characters
    let char_count: usize = name.chars().count();
    if char_count > MAX_CATEGORY_NAME_CHARS {
        return Err(DomainError::InvalidCategoryName(format!(
            "Name cannot exceed {MAX_CATEGORY_NAME_CHARS} characters, got {char_count}"
        )));
    }

    Ok(())
}

/// Validates a single answer's fields.
///
/// # Arguments
///
/// * `index` - Zero-based position of the answer within its question
/// * `answer` - The answer to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidAnswerText` if the trimmed text is empty
/// or longer than 500 characters.
pub fn validate_answer(index: usize, answer: &Answer) -> Result<(), DomainError> {
    // Rule: answer text must not be blank
    if answer.text.trim().is_empty() {
        return Err(DomainError::InvalidAnswerText {
            index,
            message: String::from("Text cannot be empty"),
        });
    }

    // Rule: answer text must not exceed 500 characters
    let char_count: usize = answer.text.chars().count();
    if char_count > MAX_ANSWER_TEXT_CHARS {
        return Err(DomainError::InvalidAnswerText {
            index,
            message: format!(
                "Text cannot exceed {MAX_ANSWER_TEXT_CHARS} characters, got {char_count}"
            ),
        });
    }

    Ok(())
}

/// Validates a question's basic field constraints.
///
/// This function checks the fields of the question itself. It does NOT
/// check that the referenced categories exist (that requires store
/// context and is done by the moderation workflow).
///
/// # Arguments
///
/// * `question` - The question to validate
///
/// # Returns
///
/// * `Ok(())` if the question's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The question text is blank
/// - The question belongs to no category
/// - Fewer than two answers are provided
/// - Any answer text is invalid
/// - No answer is marked correct
pub fn validate_question_fields(question: &Question) -> Result<(), DomainError> {
    // Rule: question text must not be blank
    if question.text.trim().is_empty() {
        return Err(DomainError::InvalidQuestionText(String::from(
            "Text cannot be empty",
        )));
    }

    // Rule: a question belongs to at least one category
    if question.category_ids.is_empty() {
        return Err(DomainError::EmptyCategorySet);
    }

    // Rule: a question carries at least two answers
    if question.answers.len() < MIN_ANSWER_COUNT {
        return Err(DomainError::TooFewAnswers {
            count: question.answers.len(),
        });
    }

    for (index, answer) in question.answers.iter().enumerate() {
        validate_answer(index, answer)?;
    }

    // Rule: at least one answer is correct
    if !question.has_correct_answer() {
        return Err(DomainError::NoCorrectAnswer);
    }

    Ok(())
}
