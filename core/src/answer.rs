use crate::error::{QuizError, Result};
use std::fmt;

/// An unordered pair of integers, stored smaller value first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootPair(i32, i32);

impl RootPair {
    pub fn new(x: i32, y: i32) -> Self {
        if x <= y {
            Self(x, y)
        } else {
            Self(y, x)
        }
    }

    pub fn low(&self) -> i32 {
        self.0
    }

    pub fn high(&self) -> i32 {
        self.1
    }

    pub fn contains(&self, value: i32) -> bool {
        self.0 == value || self.1 == value
    }
}

impl fmt::Display for RootPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerShape {
    Scalar,
    Pair,
}

impl fmt::Display for AnswerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerShape::Scalar => write!(f, "single number"),
            AnswerShape::Pair => write!(f, "pair of numbers"),
        }
    }
}

/// A correct answer, a multiple-choice candidate, or a user response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Scalar(i32),
    Pair(RootPair),
}

impl Answer {
    pub fn pair(x: i32, y: i32) -> Self {
        Answer::Pair(RootPair::new(x, y))
    }

    pub fn shape(&self) -> AnswerShape {
        match self {
            Answer::Scalar(_) => AnswerShape::Scalar,
            Answer::Pair(_) => AnswerShape::Pair,
        }
    }

    /// Fails with `ShapeMismatch` unless `self` has the `expected` shape.
    pub fn expect_shape(&self, expected: AnswerShape) -> Result<()> {
        let found = self.shape();
        if found != expected {
            return Err(QuizError::ShapeMismatch { expected, found });
        }
        Ok(())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Scalar(n) => write!(f, "{}", n),
            Answer::Pair(pair) => pair.fmt(f),
        }
    }
}
