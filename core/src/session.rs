//! Quiz flow as an explicit state machine:
//! `Configuring -> AwaitingAnswers -> Scored -> Configuring`.

use crate::answer::Answer;
use crate::error::{QuizError, Result};
use crate::plan::QuizPlan;
use crate::problem::{Problem, Prompt, VariantKind};
use crate::stats::Stats;
use log::{debug, info};
use rand::Rng;

/// Hands out unique ids for interactive widgets. Owned by the session so
/// ids never collide across re-renders or batches.
#[derive(Debug, Clone, Default)]
pub struct KeyAllocator {
    next: u64,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_key(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

#[derive(Debug, Clone)]
pub struct QuizItem {
    key: u64,
    problem: Problem,
}

impl QuizItem {
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }
}

/// A generated batch waiting for answers.
#[derive(Debug, Clone)]
pub struct Quiz {
    items: Vec<QuizItem>,
    multiple_choice: bool,
}

impl Quiz {
    pub fn generate<R: Rng + ?Sized>(
        plan: &QuizPlan,
        rng: &mut R,
        keys: &mut KeyAllocator,
    ) -> Result<Self> {
        let items = plan
            .kinds(rng)?
            .into_iter()
            .map(|kind| -> Result<QuizItem> {
                Ok(QuizItem {
                    key: keys.next_key(),
                    problem: Problem::generate(kind, rng)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            items,
            multiple_choice: plan.multiple_choice,
        })
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.multiple_choice
    }

    /// Candidates to offer for `item`, or `None` in free-form mode.
    pub fn choices_for<'a>(&self, item: &'a QuizItem) -> Option<&'a [Answer]> {
        self.multiple_choice.then(|| item.problem.choices())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: VariantKind,
    pub prompt: Prompt,
    pub response: Option<Answer>,
    pub expected: Answer,
    pub correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    pub outcomes: Vec<Outcome>,
}

impl Scorecard {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }

    pub fn percent(&self) -> usize {
        if self.outcomes.is_empty() {
            return 0;
        }
        self.correct() * 100 / self.total()
    }
}

#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Configuring,
    AwaitingAnswers(Quiz),
    Scored(Scorecard),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Configuring => "configuring",
            Phase::AwaitingAnswers(_) => "awaiting answers",
            Phase::Scored(_) => "scored",
        }
    }
}

#[derive(Debug, Default)]
pub struct QuizSession {
    phase: Phase,
    keys: KeyAllocator,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The batch being answered, if any.
    pub fn quiz(&self) -> Option<&Quiz> {
        match &self.phase {
            Phase::AwaitingAnswers(quiz) => Some(quiz),
            _ => None,
        }
    }

    /// The result of the last submission, until the next reset.
    pub fn scorecard(&self) -> Option<&Scorecard> {
        match &self.phase {
            Phase::Scored(scorecard) => Some(scorecard),
            _ => None,
        }
    }

    /// Generates a batch from `plan`. Only valid while configuring; on error
    /// the session stays in `Configuring`.
    pub fn start<R: Rng + ?Sized>(&mut self, plan: &QuizPlan, rng: &mut R) -> Result<()> {
        if !matches!(self.phase, Phase::Configuring) {
            return Err(self.invalid("start a quiz"));
        }

        let quiz = Quiz::generate(plan, rng, &mut self.keys)?;
        info!(
            "Started quiz with {} problems (multiple choice: {})",
            quiz.len(),
            quiz.multiple_choice
        );
        self.phase = Phase::AwaitingAnswers(quiz);
        Ok(())
    }

    /// Scores one response per item (`None` = left blank, counted wrong) and
    /// records the whole batch into `stats`. Every response is checked before
    /// anything is recorded; on error neither `stats` nor the phase change.
    pub fn submit(
        &mut self,
        responses: Vec<Option<Answer>>,
        stats: &mut Stats,
    ) -> Result<()> {
        let Phase::AwaitingAnswers(quiz) = &self.phase else {
            return Err(self.invalid("submit answers"));
        };

        if responses.len() != quiz.len() {
            return Err(QuizError::ResponseCountMismatch {
                expected: quiz.len(),
                found: responses.len(),
            });
        }

        let mut outcomes = Vec::with_capacity(quiz.len());
        for (item, response) in quiz.items.iter().zip(responses) {
            let correct = match &response {
                Some(answer) => item.problem.verify(answer)?,
                None => false,
            };
            outcomes.push(Outcome {
                kind: item.problem.kind(),
                prompt: item.problem.prompt(),
                response,
                expected: item.problem.answer(),
                correct,
            });
        }

        for (item, outcome) in quiz.items.iter().zip(&outcomes) {
            stats.record(&item.problem, outcome.correct);
        }

        let scorecard = Scorecard { outcomes };
        info!(
            "Scored quiz: {}/{} correct",
            scorecard.correct(),
            scorecard.total()
        );
        self.phase = Phase::Scored(scorecard);
        Ok(())
    }

    /// Returns to `Configuring` from any phase, discarding the current batch.
    pub fn reset(&mut self) {
        debug!("Resetting session from {}", self.phase.name());
        self.phase = Phase::Configuring;
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            phase: self.phase.name(),
            action,
        }
    }
}
