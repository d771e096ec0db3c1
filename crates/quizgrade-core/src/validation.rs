//! Shape checks for submissions and quiz definitions.
//!
//! Submissions are checked before any store access and fail on the first
//! violation. Quiz definitions report every violation at once so an author
//! can fix a file in one pass.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::{
    NewQuestion, NewQuiz, QuestionType, QuizUpdate, Submission, MAX_DESCRIPTION, MAX_OPTIONS,
    MAX_OPTION_TEXT, MAX_QUESTIONS, MAX_QUESTION_TEXT, MAX_SELECTED_OPTIONS, MAX_TEXT_ANSWER,
    MAX_TITLE,
};

/// Check a submission's shape.
pub fn validate_submission(submission: &Submission) -> Result<(), ValidationError> {
    if submission.quiz_id.trim().is_empty() {
        return Err(ValidationError::new("quizId", "must not be empty"));
    }

    for (i, answer) in submission.answers.iter().enumerate() {
        if answer.question_id.trim().is_empty() {
            return Err(ValidationError::new(
                format!("answers[{i}].questionId"),
                "must not be empty",
            ));
        }
        if let Some(text) = &answer.text_answer {
            if text.chars().count() > MAX_TEXT_ANSWER {
                return Err(ValidationError::new(
                    format!("answers[{i}].textAnswer"),
                    format!("cannot exceed {MAX_TEXT_ANSWER} characters"),
                ));
            }
        }
        if let Some(selected) = &answer.selected_options {
            if selected.len() > MAX_SELECTED_OPTIONS {
                return Err(ValidationError::new(
                    format!("answers[{i}].selectedOptions"),
                    format!("maximum {MAX_SELECTED_OPTIONS} options can be selected"),
                ));
            }
        }
    }

    Ok(())
}

/// Check a quiz definition, returning every violation found.
pub fn validate_new_quiz(quiz: &NewQuiz) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_title(Some(quiz.title.as_str()), &mut errors);
    check_description(quiz.description.as_deref(), &mut errors);

    if quiz.questions.is_empty() {
        errors.push(ValidationError::new(
            "questions",
            "at least one question is required",
        ));
    }
    if quiz.questions.len() > MAX_QUESTIONS {
        errors.push(ValidationError::new(
            "questions",
            format!("maximum {MAX_QUESTIONS} questions allowed"),
        ));
    }

    let mut seen_orders = HashSet::new();
    for (i, question) in quiz.questions.iter().enumerate() {
        if question.order >= 1 && !seen_orders.insert(question.order) {
            errors.push(ValidationError::new(
                format!("questions[{i}].order"),
                format!("duplicate question order: {}", question.order),
            ));
        }
        validate_question(i, question, &mut errors);
    }

    errors
}

/// Check the fields a quiz update would change.
pub fn validate_quiz_update(update: &QuizUpdate) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_title(update.title.as_deref(), &mut errors);
    check_description(update.description.as_deref(), &mut errors);
    errors
}

fn check_title(title: Option<&str>, errors: &mut Vec<ValidationError>) {
    let Some(title) = title else {
        return;
    };
    if title.trim().is_empty() {
        errors.push(ValidationError::new("title", "cannot be empty"));
    } else if title.chars().count() > MAX_TITLE {
        errors.push(ValidationError::new(
            "title",
            format!("cannot exceed {MAX_TITLE} characters"),
        ));
    }
}

fn check_description(description: Option<&str>, errors: &mut Vec<ValidationError>) {
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION {
            errors.push(ValidationError::new(
                "description",
                format!("cannot exceed {MAX_DESCRIPTION} characters"),
            ));
        }
    }
}

fn validate_question(i: usize, question: &NewQuestion, errors: &mut Vec<ValidationError>) {
    let field = |name: &str| format!("questions[{i}].{name}");

    let text_len = question.text.chars().count();
    if question.text.trim().is_empty() {
        errors.push(ValidationError::new(field("text"), "cannot be empty"));
    } else if text_len > MAX_QUESTION_TEXT {
        errors.push(ValidationError::new(
            field("text"),
            format!("cannot exceed {MAX_QUESTION_TEXT} characters"),
        ));
    }

    if question.order < 1 {
        errors.push(ValidationError::new(field("order"), "must be at least 1"));
    }

    let option_count = question.options.len();
    if option_count > MAX_OPTIONS {
        errors.push(ValidationError::new(
            field("options"),
            format!("maximum {MAX_OPTIONS} options allowed"),
        ));
    }

    match question.question_type {
        QuestionType::Boolean if option_count != 2 => errors.push(ValidationError::new(
            field("options"),
            "BOOLEAN questions need exactly 2 options",
        )),
        QuestionType::Input if option_count > 1 => errors.push(ValidationError::new(
            field("options"),
            "INPUT questions take at most 1 reference answer",
        )),
        QuestionType::Checkbox if option_count == 0 => errors.push(ValidationError::new(
            field("options"),
            "CHECKBOX questions need at least 1 option",
        )),
        _ => {}
    }

    let needs_correct = matches!(
        question.question_type,
        QuestionType::Boolean | QuestionType::Checkbox
    );
    if needs_correct && option_count > 0 && !question.options.iter().any(|o| o.is_correct) {
        errors.push(ValidationError::new(
            field("options"),
            "at least one option must be marked correct",
        ));
    }

    for (j, option) in question.options.iter().enumerate() {
        let option_field = |name: &str| format!("questions[{i}].options[{j}].{name}");
        if option.text.trim().is_empty() {
            errors.push(ValidationError::new(
                option_field("text"),
                "cannot be empty",
            ));
        } else if option.text.chars().count() > MAX_OPTION_TEXT {
            errors.push(ValidationError::new(
                option_field("text"),
                format!("cannot exceed {MAX_OPTION_TEXT} characters"),
            ));
        }
        if option.order < 1 {
            errors.push(ValidationError::new(
                option_field("order"),
                "must be at least 1",
            ));
        }
    }
}
