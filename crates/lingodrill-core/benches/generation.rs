use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use lingodrill_core::generator::{generate_with_rng, TestRatios};
use lingodrill_core::model::{ReadingQuestion, SentenceItem, VocabItem};
use lingodrill_core::normalize::normalize_vocabs;

fn pools(n: usize) -> (Vec<VocabItem>, Vec<SentenceItem>, Vec<ReadingQuestion>) {
    let vocabs = (0..n)
        .map(|i| VocabItem {
            id: format!("v{i}"),
            hanzi: format!("字{i}"),
            pinyin: format!("zi{i}"),
            meaning: format!("chữ {i}"),
            unit_tag: None,
        })
        .collect();
    let sentences = (0..n)
        .map(|i| SentenceItem {
            id: format!("s{i}"),
            hanzi: format!("句子{i}"),
            meaning: format!("câu {i}"),
            pinyin: None,
            options: None,
            correct_answer: None,
            lesson_id: None,
            lesson_title: None,
        })
        .collect();
    let reading = (0..n)
        .map(|i| ReadingQuestion {
            id: format!("r{i}"),
            question_text: format!("câu hỏi {i}"),
            options: None,
            answer: format!("đáp án {i}"),
            question_type: None,
            prompt_language: None,
            unit: None,
        })
        .collect();
    (vocabs, sentences, reading)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for n in [100, 10_000] {
        let (vocabs, sentences, reading) = pools(n);
        group.bench_function(format!("pool={n},target=50"), |b| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| {
                generate_with_rng(
                    black_box(&vocabs),
                    black_box(&sentences),
                    black_box(&reading),
                    50,
                    TestRatios::default(),
                    &mut rng,
                )
            })
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let payload = json!({
        "vocabs": (0..1_000)
            .map(|i| json!({"_id": format!("v{i}"), "zh": "你好", "pinyin": "nǐ hǎo", "vi": "xin chào"}))
            .collect::<Vec<_>>()
    });
    c.bench_function("normalize_vocabs/1000", |b| {
        b.iter(|| normalize_vocabs(black_box(&payload)))
    });
}

criterion_group!(benches, bench_generate, bench_normalize);
criterion_main!(benches);
