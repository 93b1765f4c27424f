//! Problem generation, answer checking, and score keeping for the math quiz.
//! Rendering is left to the host; see the `desktop` crate.

pub mod answer;
pub mod choices;
pub mod error;
pub mod plan;
pub mod problem;
pub mod session;
pub mod stats;
pub mod store;

pub use answer::{Answer, AnswerShape, RootPair};
pub use choices::CHOICE_COUNT;
pub use error::{QuizError, StorageError};
pub use plan::{QuizPlan, Selection};
pub use problem::{Level, LineChart, Point, Problem, Prompt, Variant, VariantKind};
pub use session::{KeyAllocator, Outcome, Phase, Quiz, QuizItem, QuizSession, Scorecard};
pub use stats::{ProblemRecord, Stats};
pub use store::StatsStore;
