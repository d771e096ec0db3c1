use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizgrade_core::grading::{grade_question, grade_submission};
use quizgrade_core::model::{Question, QuestionOption, QuestionType, Quiz, SubmittedAnswer};

fn make_question(n: usize, kind: QuestionType) -> Question {
    let id = format!("q{n}");
    let options = match kind {
        QuestionType::Boolean => vec![("true", true), ("false", false)],
        QuestionType::Input => vec![("Reference answer", true)],
        QuestionType::Checkbox => (0..10).map(|i| ("choice", i % 3 == 0)).collect(),
    };
    Question {
        id: id.clone(),
        quiz_id: "bench".into(),
        text: format!("Question {n}"),
        question_type: kind,
        order: n as u32 + 1,
        required: true,
        options: options
            .into_iter()
            .enumerate()
            .map(|(i, (text, is_correct))| QuestionOption {
                id: format!("{id}-o{i}"),
                text: text.into(),
                is_correct,
                order: i as u32 + 1,
                question_id: id.clone(),
            })
            .collect(),
    }
}

fn make_answer(question: &Question) -> SubmittedAnswer {
    SubmittedAnswer {
        question_id: question.id.clone(),
        text_answer: Some("  reference ANSWER ".into()),
        boolean_answer: Some(true),
        selected_options: Some(
            question
                .correct_options()
                .take(2)
                .map(|o| o.id.clone())
                .collect(),
        ),
    }
}

fn bench_grade_question(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_question");

    for kind in [
        QuestionType::Boolean,
        QuestionType::Input,
        QuestionType::Checkbox,
    ] {
        let question = make_question(0, kind);
        let answer = make_answer(&question);
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| grade_question(black_box(&question), black_box(&answer)))
        });
    }

    group.finish();
}

fn bench_grade_submission(c: &mut Criterion) {
    let kinds = [
        QuestionType::Boolean,
        QuestionType::Input,
        QuestionType::Checkbox,
    ];
    let questions: Vec<Question> = (0..50)
        .map(|n| make_question(n, kinds[n % kinds.len()]))
        .collect();
    let answers: Vec<SubmittedAnswer> = questions.iter().map(make_answer).collect();
    let now = Utc::now();
    let quiz = Quiz {
        id: "bench".into(),
        title: "Bench".into(),
        description: None,
        questions,
        created_at: now,
        updated_at: now,
    };

    c.bench_function("grade_submission/50_questions", |b| {
        b.iter(|| grade_submission(black_box(&quiz), black_box(&answers)))
    });
}

criterion_group!(benches, bench_grade_question, bench_grade_submission);
criterion_main!(benches);
