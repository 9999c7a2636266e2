use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::{Question, Quiz};

fn make_quiz(pool: usize) -> Quiz {
    let mut quiz = Quiz::with_seed(11);
    for i in 0..pool {
        quiz.add_existing(
            Question::new(
                format!("question {i}"),
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                i % 4,
            )
            .unwrap(),
        );
    }
    quiz
}

fn play_through(quiz: &mut Quiz, num_questions: Option<usize>) -> usize {
    let mut current = quiz.start_quiz("bench", num_questions);
    while let Some(q) = current {
        quiz.submit_answer("bench", q.question.id, 0).unwrap();
        current = quiz.get_next_question_for_player("bench");
    }
    quiz.get_player_score_history("bench").len()
}

fn bench_start_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("start_quiz");

    for pool in [10usize, 100, 1000] {
        let mut quiz = make_quiz(pool);
        group.bench_function(format!("pool={pool},n=10"), |b| {
            b.iter(|| quiz.start_quiz(black_box("bench"), black_box(Some(10))))
        });
    }

    group.finish();
}

fn bench_full_attempt(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_attempt");

    group.bench_function("pool=100,n=20", |b| {
        let mut quiz = make_quiz(100);
        b.iter(|| play_through(black_box(&mut quiz), Some(20)))
    });

    group.bench_function("pool=50,all", |b| {
        let mut quiz = make_quiz(50);
        b.iter(|| play_through(black_box(&mut quiz), None))
    });

    group.finish();
}

criterion_group!(benches, bench_start_quiz, bench_full_attempt);
criterion_main!(benches);
