//! Multiple-choice candidate sets: the correct answer plus distinct
//! distractors drawn from a half-open integer domain, in shuffled order.

use crate::answer::RootPair;
use crate::error::{QuizError, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of candidates offered per problem, correct answer included.
pub const CHOICE_COUNT: usize = 4;

const DISTRACTORS: usize = CHOICE_COUNT - 1;

/// Picks three distinct values from `min..max` other than `answer`, adds
/// `answer`, and shuffles.
pub fn integer_choices<R: Rng + ?Sized>(
    answer: i32,
    min: i32,
    max: i32,
    rng: &mut R,
) -> Result<Vec<i32>> {
    let pool: Vec<i32> = (min..max).filter(|&n| n != answer).collect();
    if pool.len() < DISTRACTORS {
        return Err(QuizError::ChoicePoolTooSmall {
            available: pool.len(),
            needed: DISTRACTORS,
        });
    }

    let mut choices: Vec<i32> = pool.choose_multiple(rng, DISTRACTORS).copied().collect();
    choices.push(answer);
    choices.shuffle(rng);
    debug!("Integer choices for {}: {:?}", answer, choices);
    Ok(choices)
}

/// Builds four distinct unordered pairs, `answer` among them. Distractor
/// components come from `min..max` minus both components of `answer`; the
/// two components of a distractor are drawn independently and may coincide.
pub fn pair_choices<R: Rng + ?Sized>(
    answer: RootPair,
    min: i32,
    max: i32,
    rng: &mut R,
) -> Result<Vec<RootPair>> {
    let pool: Vec<i32> = (min..max).filter(|&n| !answer.contains(n)).collect();
    let distinct_pairs = pool.len() * (pool.len() + 1) / 2;
    if distinct_pairs < DISTRACTORS {
        return Err(QuizError::ChoicePoolTooSmall {
            available: pool.len(),
            needed: DISTRACTORS,
        });
    }

    let mut choices = vec![answer];
    while choices.len() < CHOICE_COUNT {
        // Pool is non-empty: distinct_pairs >= DISTRACTORS > 0.
        let x = pool[rng.gen_range(0..pool.len())];
        let y = pool[rng.gen_range(0..pool.len())];
        let candidate = RootPair::new(x, y);
        if !choices.contains(&candidate) {
            choices.push(candidate);
        }
    }
    choices.shuffle(rng);
    debug!("Pair choices for {}: {:?}", answer, choices);
    Ok(choices)
}
