use crate::error::StorageError;
use crate::problem::{Problem, VariantKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub problem_type: VariantKind,
    pub problem_tags: Vec<String>,
    pub user_answer_correct: bool,
}

/// Running tally of every problem the user has submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_problems: u32,
    pub correct_problems: u32,
    pub total_problems_by_tag: BTreeMap<String, u32>,
    pub problem_history: Vec<ProblemRecord>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, problem: &Problem, correct: bool) {
        self.total_problems += 1;
        if correct {
            self.correct_problems += 1;
        }
        for tag in problem.tags() {
            *self.total_problems_by_tag.entry(tag.to_string()).or_insert(0) += 1;
        }
        self.problem_history.push(ProblemRecord {
            problem_type: problem.kind(),
            problem_tags: problem.tags().iter().map(|t| t.to_string()).collect(),
            user_answer_correct: correct,
        });
    }

    /// Whole-number percentage, rounded down; 0 before any problem is recorded.
    pub fn percent_correct(&self) -> u32 {
        if self.total_problems == 0 {
            return 0;
        }
        (u64::from(self.correct_problems) * 100 / u64::from(self.total_problems)) as u32
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_wrong(&self) -> u32 {
        self.total_problems.saturating_sub(self.correct_problems)
    }

    /// `(attempted, correct)` per problem kind, from the history.
    pub fn by_kind(&self) -> BTreeMap<VariantKind, (u32, u32)> {
        let mut tally = BTreeMap::new();
        for record in &self.problem_history {
            let entry = tally.entry(record.problem_type).or_insert((0, 0));
            entry.0 += 1;
            if record.user_answer_correct {
                entry.1 += 1;
            }
        }
        tally
    }

    pub(crate) fn validate(&self) -> Result<(), StorageError> {
        if self.correct_problems > self.total_problems {
            return Err(StorageError::Inconsistent {
                correct: self.correct_problems,
                total: self.total_problems,
            });
        }
        Ok(())
    }
}
