//! Per-question grading rules and score aggregation.
//!
//! Every function here is pure: no I/O, no shared state, inputs are only
//! borrowed. Grading never fails; an answer that cannot be matched simply
//! contributes nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionType, Quiz, SubmittedAnswer};

/// Score a single answer against its question, in [0, 1].
pub fn grade_question(question: &Question, answer: &SubmittedAnswer) -> f64 {
    match question.question_type {
        QuestionType::Boolean => grade_boolean(question, answer),
        QuestionType::Checkbox => grade_checkbox(question, answer),
        QuestionType::Input => grade_input(question, answer),
    }
}

/// The correct option's text is compared against `"true"`/`"false"`, so
/// relabelled options keep working as long as their text is one of those.
fn grade_boolean(question: &Question, answer: &SubmittedAnswer) -> f64 {
    let Some(correct) = question.correct_options().next() else {
        return 0.0;
    };
    match answer.boolean_answer {
        Some(value) if correct.text.to_lowercase() == value.to_string() => 1.0,
        _ => 0.0,
    }
}

/// Any wrong selection zeroes the question; otherwise the score is the
/// fraction of correct options selected.
fn grade_checkbox(question: &Question, answer: &SubmittedAnswer) -> f64 {
    let correct: HashSet<&str> = question.correct_options().map(|o| o.id.as_str()).collect();
    if correct.is_empty() {
        return 0.0;
    }

    let selected: HashSet<&str> = answer
        .selected_options
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();

    if !selected.is_subset(&correct) {
        return 0.0;
    }

    selected.len() as f64 / correct.len() as f64
}

/// Questions without a reference answer are free-response and always count.
fn grade_input(question: &Question, answer: &SubmittedAnswer) -> f64 {
    if question.options.is_empty() {
        return 1.0;
    }

    let submitted = normalize(answer.text_answer.as_deref().unwrap_or(""));
    if question
        .correct_options()
        .any(|o| normalize(&o.text) == submitted)
    {
        1.0
    } else {
        0.0
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Result of grading a whole submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Score of each answer, in submission order. `None` means the answer
    /// referenced no question of the quiz and was left out of the aggregate.
    pub per_answer: Vec<Option<f64>>,
    /// Sum of the per-question fractional scores.
    pub total_score: f64,
    /// Number of answers that matched a question.
    pub total_questions: u32,
    /// Average fractional correctness as a percentage in [0, 100].
    pub final_score: f64,
}

/// Grade every answer against the quiz and aggregate.
///
/// The final score is `total_score / total_questions * 100`, or 0 when no
/// answer matched a question.
pub fn grade_submission(quiz: &Quiz, answers: &[SubmittedAnswer]) -> Grade {
    let per_answer: Vec<Option<f64>> = answers
        .iter()
        .map(|answer| {
            quiz.question(&answer.question_id)
                .map(|question| grade_question(question, answer))
        })
        .collect();

    let total_score: f64 = per_answer.iter().flatten().sum();
    let total_questions = per_answer.iter().filter(|s| s.is_some()).count() as u32;
    let final_score = if total_questions > 0 {
        total_score / total_questions as f64 * 100.0
    } else {
        0.0
    };

    Grade {
        per_answer,
        total_score,
        total_questions,
        final_score,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::QuestionOption;

    pub(crate) fn question(
        id: &str,
        kind: QuestionType,
        options: &[(&str, &str, bool)],
    ) -> Question {
        Question {
            id: id.into(),
            quiz_id: "quiz".into(),
            text: format!("question {id}"),
            question_type: kind,
            order: 1,
            required: true,
            options: options
                .iter()
                .enumerate()
                .map(|(i, (oid, text, is_correct))| QuestionOption {
                    id: (*oid).into(),
                    text: (*text).into(),
                    is_correct: *is_correct,
                    order: i as u32 + 1,
                    question_id: id.into(),
                })
                .collect(),
        }
    }

    pub(crate) fn quiz(questions: Vec<Question>) -> Quiz {
        let now = Utc::now();
        Quiz {
            id: "quiz".into(),
            title: "Quiz".into(),
            description: None,
            questions,
            created_at: now,
            updated_at: now,
        }
    }

    fn selected(question_id: &str, ids: &[&str]) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id: question_id.into(),
            selected_options: Some(ids.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn text(question_id: &str, value: &str) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id: question_id.into(),
            text_answer: Some(value.into()),
            ..Default::default()
        }
    }

    fn boolean(question_id: &str, value: bool) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id: question_id.into(),
            boolean_answer: Some(value),
            ..Default::default()
        }
    }

    fn checkbox() -> Question {
        question(
            "q",
            QuestionType::Checkbox,
            &[("a", "A", true), ("b", "B", true), ("c", "C", false)],
        )
    }

    #[test]
    fn checkbox_exact_match_scores_full() {
        assert_eq!(
            grade_question(&checkbox(), &selected("q", &["a", "b"])),
            1.0
        );
        assert_eq!(
            grade_question(&checkbox(), &selected("q", &["b", "a"])),
            1.0
        );
    }

    #[test]
    fn checkbox_under_selection_gets_partial_credit() {
        assert_eq!(grade_question(&checkbox(), &selected("q", &["a"])), 0.5);
    }

    #[test]
    fn checkbox_any_wrong_selection_zeroes() {
        assert_eq!(
            grade_question(&checkbox(), &selected("q", &["a", "b", "c"])),
            0.0
        );
        assert_eq!(grade_question(&checkbox(), &selected("q", &["c"])), 0.0);
        assert_eq!(
            grade_question(&checkbox(), &selected("q", &["unknown"])),
            0.0
        );
    }

    #[test]
    fn checkbox_empty_or_missing_selection_scores_zero() {
        assert_eq!(grade_question(&checkbox(), &selected("q", &[])), 0.0);
        let missing = SubmittedAnswer {
            question_id: "q".into(),
            ..Default::default()
        };
        assert_eq!(grade_question(&checkbox(), &missing), 0.0);
    }

    #[test]
    fn checkbox_duplicates_count_once() {
        assert_eq!(
            grade_question(&checkbox(), &selected("q", &["a", "a"])),
            0.5
        );
    }

    #[test]
    fn checkbox_without_correct_options_scores_zero() {
        let q = question("q", QuestionType::Checkbox, &[("a", "A", false)]);
        assert_eq!(grade_question(&q, &selected("q", &[])), 0.0);
    }

    #[test]
    fn checkbox_scores_stay_in_range() {
        let q = checkbox();
        let ids = ["a", "b", "c", "x"];
        for mask in 0u32..16 {
            let pick: Vec<&str> = ids
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| *id)
                .collect();
            let score = grade_question(&q, &selected("q", &pick));
            assert!((0.0..=1.0).contains(&score), "mask {mask} gave {score}");
        }
    }

    #[test]
    fn input_without_reference_always_counts() {
        let q = question("q", QuestionType::Input, &[]);
        assert_eq!(grade_question(&q, &text("q", "anything")), 1.0);
        assert_eq!(grade_question(&q, &text("q", "")), 1.0);
        let missing = SubmittedAnswer {
            question_id: "q".into(),
            ..Default::default()
        };
        assert_eq!(grade_question(&q, &missing), 1.0);
    }

    #[test]
    fn input_matches_trimmed_and_case_insensitive() {
        let q = question("q", QuestionType::Input, &[("r", "Paris", true)]);
        assert_eq!(grade_question(&q, &text("q", "paris")), 1.0);
        assert_eq!(grade_question(&q, &text("q", " Paris ")), 1.0);
        assert_eq!(grade_question(&q, &text("q", "London")), 0.0);
    }

    #[test]
    fn input_missing_text_is_empty() {
        let q = question("q", QuestionType::Input, &[("r", "Paris", true)]);
        let missing = SubmittedAnswer {
            question_id: "q".into(),
            ..Default::default()
        };
        assert_eq!(grade_question(&q, &missing), 0.0);
    }

    #[test]
    fn input_ignores_reference_not_flagged_correct() {
        let q = question("q", QuestionType::Input, &[("r", "Paris", false)]);
        assert_eq!(grade_question(&q, &text("q", "Paris")), 0.0);
    }

    #[test]
    fn boolean_compares_against_correct_option_text() {
        let q = question(
            "q",
            QuestionType::Boolean,
            &[("t", "True", true), ("f", "False", false)],
        );
        assert_eq!(grade_question(&q, &boolean("q", true)), 1.0);
        assert_eq!(grade_question(&q, &boolean("q", false)), 0.0);

        let q = question(
            "q",
            QuestionType::Boolean,
            &[("t", "true", false), ("f", "FALSE", true)],
        );
        assert_eq!(grade_question(&q, &boolean("q", false)), 1.0);
        assert_eq!(grade_question(&q, &boolean("q", true)), 0.0);
    }

    #[test]
    fn boolean_missing_answer_scores_zero() {
        let q = question(
            "q",
            QuestionType::Boolean,
            &[("t", "true", true), ("f", "false", false)],
        );
        let missing = SubmittedAnswer {
            question_id: "q".into(),
            ..Default::default()
        };
        assert_eq!(grade_question(&q, &missing), 0.0);
    }

    #[test]
    fn aggregate_averages_fractional_scores() {
        let quiz = quiz(vec![
            question(
                "q1",
                QuestionType::Checkbox,
                &[("a", "A", true), ("b", "B", true), ("c", "C", false)],
            ),
            question("q2", QuestionType::Input, &[("r", "42", true)]),
        ]);
        let answers = vec![selected("q1", &["a"]), text("q2", "42")];

        let grade = grade_submission(&quiz, &answers);
        assert_eq!(grade.per_answer, vec![Some(0.5), Some(1.0)]);
        assert_eq!(grade.total_score, 1.5);
        assert_eq!(grade.total_questions, 2);
        assert_eq!(grade.final_score, 75.0);

        assert_eq!(grade_submission(&quiz, &answers), grade);
    }

    #[test]
    fn aggregate_skips_unknown_questions() {
        let quiz = quiz(vec![question(
            "q1",
            QuestionType::Input,
            &[("r", "42", true)],
        )]);
        let answers = vec![text("q1", "42"), text("ghost", "42")];

        let grade = grade_submission(&quiz, &answers);
        assert_eq!(grade.per_answer, vec![Some(1.0), None]);
        assert_eq!(grade.total_questions, 1);
        assert_eq!(grade.final_score, 100.0);
    }

    #[test]
    fn aggregate_with_no_matches_is_zero() {
        let quiz = quiz(vec![question("q1", QuestionType::Input, &[])]);
        let grade = grade_submission(&quiz, &[text("ghost", "x")]);
        assert_eq!(grade.total_questions, 0);
        assert_eq!(grade.final_score, 0.0);
        assert!(!grade.final_score.is_nan());

        let empty = grade_submission(&quiz, &[]);
        assert_eq!(empty.final_score, 0.0);
    }
}
