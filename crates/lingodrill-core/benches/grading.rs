use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lingodrill_core::grader::{answers_match, grade};
use lingodrill_core::model::{AnswerRecord, SourceType, TestQuestion};

fn make_test(n: usize) -> (Vec<TestQuestion>, AnswerRecord) {
    let kinds = [SourceType::Vocab, SourceType::Sentence, SourceType::Reading];
    let questions: Vec<TestQuestion> = (0..n)
        .map(|i| TestQuestion {
            id: format!("q{i}"),
            source_type: kinds[i % 3],
            prompt_text: format!("prompt {i}"),
            pinyin_hint: None,
            options: (i % 2 == 0).then(|| vec!["A".to_string(), "B".to_string()]),
            correct_answer: format!("Answer {i}"),
            render_content: None,
            content_kind: None,
        })
        .collect();
    let answers = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let given = if i % 4 == 0 {
                "wrong".to_string()
            } else {
                q.correct_answer.to_lowercase()
            };
            (q.id.clone(), given)
        })
        .collect();
    (questions, answers)
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    for n in [10, 50, 500] {
        let (questions, answers) = make_test(n);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| grade(black_box(&questions), black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_answers_match(c: &mut Criterion) {
    let (questions, _) = make_test(3);
    c.bench_function("answers_match/sentence", |b| {
        b.iter(|| answers_match(black_box(&questions[1]), black_box("  ANSWER 1 ")))
    });
}

criterion_group!(benches, bench_grade, bench_answers_match);
criterion_main!(benches);
