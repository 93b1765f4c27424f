//! How a batch of problems is picked.

use crate::error::{QuizError, Result};
use crate::problem::VariantKind;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `count` problems, each of a uniformly random kind.
    Random { count: usize },
    /// Exact counts per kind, generated in kind order.
    ByProblem {
        addition: usize,
        line_slope: usize,
        quadratic: usize,
    },
    /// `total` problems split evenly over `kinds`; the first kind takes the
    /// remainder.
    QuickPractice { kinds: Vec<VariantKind>, total: usize },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Random { count: 5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizPlan {
    pub selection: Selection,
    pub multiple_choice: bool,
}

impl QuizPlan {
    pub fn new(selection: Selection, multiple_choice: bool) -> Self {
        Self {
            selection,
            multiple_choice,
        }
    }

    pub fn total(&self) -> usize {
        match &self.selection {
            Selection::Random { count } => *count,
            Selection::ByProblem {
                addition,
                line_slope,
                quadratic,
            } => addition + line_slope + quadratic,
            Selection::QuickPractice { total, .. } => *total,
        }
    }

    /// Resolves the plan into the ordered list of kinds to generate.
    pub fn kinds<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<VariantKind>> {
        match &self.selection {
            Selection::Random { count } => Ok((0..*count)
                .filter_map(|_| VariantKind::ALL.choose(rng).copied())
                .collect()),
            Selection::ByProblem {
                addition,
                line_slope,
                quadratic,
            } => {
                let mut kinds = Vec::with_capacity(self.total());
                kinds.extend(std::iter::repeat(VariantKind::Addition).take(*addition));
                kinds.extend(std::iter::repeat(VariantKind::LineSlope).take(*line_slope));
                kinds.extend(std::iter::repeat(VariantKind::Quadratic).take(*quadratic));
                Ok(kinds)
            }
            Selection::QuickPractice { kinds, total } => quick_practice(kinds, *total),
        }
    }
}

fn quick_practice(selected: &[VariantKind], total: usize) -> Result<Vec<VariantKind>> {
    let mut unique: Vec<VariantKind> = Vec::with_capacity(selected.len());
    for kind in selected {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }

    if unique.is_empty() {
        if total == 0 {
            return Ok(Vec::new());
        }
        return Err(QuizError::NoVariantsSelected { requested: total });
    }

    let rate = total / unique.len();
    let excess = total % unique.len();
    let mut kinds = Vec::with_capacity(total);
    for (i, kind) in unique.into_iter().enumerate() {
        let count = if i == 0 { rate + excess } else { rate };
        kinds.extend(std::iter::repeat(kind).take(count));
    }
    Ok(kinds)
}
