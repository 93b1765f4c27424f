use mq_core::{
    Answer, Phase, QuizPlan, QuizSession, Selection, Stats, StatsStore, VariantKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn quick_practice(total: usize) -> QuizPlan {
    QuizPlan::new(
        Selection::QuickPractice {
            kinds: vec![VariantKind::Addition, VariantKind::Quadratic],
            total,
        },
        true,
    )
}

#[test]
fn answer_score_persist_reload() {
    let dir = TempDir::new().unwrap();
    let store = StatsStore::new(dir.path().join("stats.json"));
    let mut rng = StdRng::seed_from_u64(77);

    let mut stats = store.load();
    assert_eq!(stats, Stats::default());

    let mut session = QuizSession::new();
    session.start(&quick_practice(5), &mut rng).unwrap();
    let quiz = session.quiz().unwrap().clone();
    assert_eq!(quiz.len(), 5);

    // Pick the correct candidate from the offered choices for every problem
    // except the last, which gets a deliberately wrong one.
    let responses: Vec<Option<Answer>> = quiz
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let answer = item.problem().answer();
            let choices = quiz.choices_for(item).unwrap();
            if i + 1 == quiz.len() {
                choices.iter().copied().find(|c| *c != answer)
            } else {
                choices.iter().copied().find(|c| *c == answer)
            }
        })
        .collect();

    session.submit(responses, &mut stats).unwrap();
    assert_eq!(session.scorecard().unwrap().correct(), 4);
    store.save(&stats).unwrap();

    let reloaded = store.load();
    assert_eq!(reloaded.total_problems, 5);
    assert_eq!(reloaded.correct_problems, 4);
    assert_eq!(reloaded.percent_correct(), 80);
    // Addition takes the remainder: 3 additions, 2 quadratics.
    assert_eq!(reloaded.total_problems_by_tag["Arithmetic"], 3);
    assert_eq!(reloaded.total_problems_by_tag["Algebra"], 2);
    assert_eq!(reloaded.problem_history.len(), 5);
    assert!(!reloaded.problem_history[4].user_answer_correct);
}

#[test]
fn batches_accumulate_and_reset_discards_file() {
    let dir = TempDir::new().unwrap();
    let store = StatsStore::new(dir.path().join("stats.json"));
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = QuizSession::new();

    for _ in 0..2 {
        let mut stats = store.load();
        session.start(&quick_practice(2), &mut rng).unwrap();
        let count = session.quiz().map_or(0, |quiz| quiz.len());
        assert_eq!(count, 2);
        session.submit(vec![None; count], &mut stats).unwrap();
        assert!(matches!(session.phase(), Phase::Scored(_)));
        store.save(&stats).unwrap();
        session.reset();
    }

    let mut stats = store.load();
    assert_eq!(stats.total_problems, 4);
    assert_eq!(stats.correct_problems, 0);
    assert_eq!(stats.percent_correct(), 0);

    stats.reset();
    store.clear().unwrap();
    assert!(!store.path().exists());
    assert_eq!(store.load(), stats);
}
