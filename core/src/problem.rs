use crate::answer::{Answer, AnswerShape, RootPair};
use crate::choices::{integer_choices, pair_choices};
use crate::error::{QuizError, Result};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ADDEND_RANGE: (i32, i32) = (1, 10);
pub const SLOPE_RANGE: (i32, i32) = (-5, 5);
pub const ROOT_RANGE: (i32, i32) = (-10, 10);
pub const SCALAR_RANGE: (i32, i32) = (-10, 10);

/// First point of every line-slope chart.
pub const LINE_ORIGIN: Point = Point { x: -10, y: 5 };
const LINE_RUN: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantKind {
    Addition,
    LineSlope,
    Quadratic,
}

impl VariantKind {
    pub const ALL: [VariantKind; 3] = [
        VariantKind::Addition,
        VariantKind::LineSlope,
        VariantKind::Quadratic,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            VariantKind::Addition => "Addition",
            VariantKind::LineSlope => "Line Slope",
            VariantKind::Quadratic => "Quadratic",
        }
    }

    pub fn answer_shape(&self) -> AnswerShape {
        match self {
            VariantKind::Addition | VariantKind::LineSlope => AnswerShape::Scalar,
            VariantKind::Quadratic => AnswerShape::Pair,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for VariantKind {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match wanted.as_str() {
            "addition" => Ok(VariantKind::Addition),
            "lineslope" => Ok(VariantKind::LineSlope),
            "quadratic" => Ok(VariantKind::Quadratic),
            _ => Err(QuizError::UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Elementary,
    Middle,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Elementary => write!(f, "Elementary"),
            Level::Middle => write!(f, "Middle"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A straight line through two points, for the host to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChart {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub chart: Option<LineChart>,
}

fn check_range(name: &'static str, value: i32, (min, max): (i32, i32)) -> Result<i32> {
    if value < min || value > max {
        return Err(QuizError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

fn draw<R: Rng + ?Sized>(rng: &mut R, (min, max): (i32, i32)) -> i32 {
    rng.gen_range(min..=max)
}

// ── Addition ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addition {
    a: i32,
    b: i32,
}

impl Addition {
    pub const TAGS: &'static [&'static str] = &["Arithmetic"];
    pub const CHOICE_DOMAIN: (i32, i32) = (2, 21);

    pub fn new(a: i32, b: i32) -> Result<Self> {
        Ok(Self {
            a: check_range("a", a, ADDEND_RANGE)?,
            b: check_range("b", b, ADDEND_RANGE)?,
        })
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            a: draw(rng, ADDEND_RANGE),
            b: draw(rng, ADDEND_RANGE),
        }
    }

    pub fn a(&self) -> i32 {
        self.a
    }

    pub fn b(&self) -> i32 {
        self.b
    }

    pub fn answer(&self) -> i32 {
        self.a + self.b
    }

    pub fn prompt(&self) -> Prompt {
        Prompt {
            text: format!(
                "Bob has {} apples, Carl has {} apples. How many apples do they have together?",
                self.a, self.b
            ),
            chart: None,
        }
    }
}

// ── Line slope ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSlope {
    m: i32,
}

impl LineSlope {
    pub const TAGS: &'static [&'static str] = &["Algebra", "Graphing"];
    pub const CHOICE_DOMAIN: (i32, i32) = (-5, 6);

    pub fn new(m: i32) -> Result<Self> {
        Ok(Self {
            m: check_range("m", m, SLOPE_RANGE)?,
        })
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            m: draw(rng, SLOPE_RANGE),
        }
    }

    pub fn slope(&self) -> i32 {
        self.m
    }

    pub fn chart(&self) -> LineChart {
        LineChart {
            from: LINE_ORIGIN,
            to: Point {
                x: LINE_ORIGIN.x + LINE_RUN,
                y: self.m * LINE_RUN + LINE_ORIGIN.y,
            },
        }
    }

    pub fn prompt(&self) -> Prompt {
        Prompt {
            text: "What is the slope of the line below?".to_string(),
            chart: Some(self.chart()),
        }
    }
}

// ── Quadratic ─────────────────────────────────────────────────────────────────

/// `k(x + r0)(x + r1) = 0`, whose roots are `-r0` and `-r1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadratic {
    r0: i32,
    r1: i32,
    k: i32,
}

impl Quadratic {
    pub const TAGS: &'static [&'static str] = &["Algebra"];
    pub const CHOICE_DOMAIN: (i32, i32) = (-10, 10);

    pub fn new(r0: i32, r1: i32, k: i32) -> Result<Self> {
        check_range("r0", r0, ROOT_RANGE)?;
        check_range("r1", r1, ROOT_RANGE)?;
        check_range("k", k, SCALAR_RANGE)?;
        if r0 == r1 {
            return Err(QuizError::RepeatedRoot(r0));
        }
        if k == 0 {
            return Err(QuizError::DegenerateQuadratic);
        }
        Ok(Self { r0, r1, k })
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r0 = draw(rng, ROOT_RANGE);
        let mut r1 = draw(rng, ROOT_RANGE);
        while r1 == r0 {
            r1 = draw(rng, ROOT_RANGE);
        }
        let mut k = draw(rng, SCALAR_RANGE);
        while k == 0 {
            k = draw(rng, SCALAR_RANGE);
        }
        Self { r0, r1, k }
    }

    /// `(a, b, c)` of `ax^2 + bx + c`.
    pub fn coefficients(&self) -> (i32, i32, i32) {
        (
            self.k,
            self.k * (self.r0 + self.r1),
            self.k * self.r0 * self.r1,
        )
    }

    pub fn answer(&self) -> RootPair {
        RootPair::new(-self.r0, -self.r1)
    }

    pub fn prompt(&self) -> Prompt {
        let (a, b, c) = self.coefficients();
        Prompt {
            text: format!(
                "What are the roots of the equation {} = 0?",
                format_polynomial(a, b, c)
            ),
            chart: None,
        }
    }
}

fn format_polynomial(a: i32, b: i32, c: i32) -> String {
    let mut out = String::new();
    for (coef, var) in [(a, "x^2"), (b, "x"), (c, "")] {
        if coef == 0 {
            continue;
        }
        let sign = match (out.is_empty(), coef < 0) {
            (true, true) => "-",
            (true, false) => "",
            (false, true) => " - ",
            (false, false) => " + ",
        };
        out.push_str(sign);
        if coef.abs() != 1 || var.is_empty() {
            out.push_str(&coef.abs().to_string());
        }
        out.push_str(var);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

// ── Problem ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Addition(Addition),
    LineSlope(LineSlope),
    Quadratic(Quadratic),
}

impl Variant {
    pub fn generate<R: Rng + ?Sized>(kind: VariantKind, rng: &mut R) -> Self {
        match kind {
            VariantKind::Addition => Variant::Addition(Addition::generate(rng)),
            VariantKind::LineSlope => Variant::LineSlope(LineSlope::generate(rng)),
            VariantKind::Quadratic => Variant::Quadratic(Quadratic::generate(rng)),
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Addition(_) => VariantKind::Addition,
            Variant::LineSlope(_) => VariantKind::LineSlope,
            Variant::Quadratic(_) => VariantKind::Quadratic,
        }
    }

    pub fn answer(&self) -> Answer {
        match self {
            Variant::Addition(p) => Answer::Scalar(p.answer()),
            Variant::LineSlope(p) => Answer::Scalar(p.slope()),
            Variant::Quadratic(p) => Answer::Pair(p.answer()),
        }
    }

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            Variant::Addition(_) => Addition::TAGS,
            Variant::LineSlope(_) => LineSlope::TAGS,
            Variant::Quadratic(_) => Quadratic::TAGS,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Variant::Addition(_) => Level::Elementary,
            Variant::LineSlope(_) | Variant::Quadratic(_) => Level::Middle,
        }
    }

    pub fn prompt(&self) -> Prompt {
        match self {
            Variant::Addition(p) => p.prompt(),
            Variant::LineSlope(p) => p.prompt(),
            Variant::Quadratic(p) => p.prompt(),
        }
    }

    fn choices<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Answer>> {
        let choices = match self {
            Variant::Addition(p) => {
                let (min, max) = Addition::CHOICE_DOMAIN;
                integer_choices(p.answer(), min, max, rng)?
                    .into_iter()
                    .map(Answer::Scalar)
                    .collect()
            }
            Variant::LineSlope(p) => {
                let (min, max) = LineSlope::CHOICE_DOMAIN;
                integer_choices(p.slope(), min, max, rng)?
                    .into_iter()
                    .map(Answer::Scalar)
                    .collect()
            }
            Variant::Quadratic(p) => {
                let (min, max) = Quadratic::CHOICE_DOMAIN;
                pair_choices(p.answer(), min, max, rng)?
                    .into_iter()
                    .map(Answer::Pair)
                    .collect()
            }
        };
        Ok(choices)
    }
}

/// One generated problem with its multiple-choice candidates. The candidate
/// order is fixed at construction so it survives re-renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    variant: Variant,
    choices: Vec<Answer>,
}

impl Problem {
    pub fn generate<R: Rng + ?Sized>(kind: VariantKind, rng: &mut R) -> Result<Self> {
        Self::with_rng(Variant::generate(kind, rng), rng)
    }

    /// Like `generate`, with the kind given by name ("Line Slope", "quadratic", ...).
    pub fn create<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Result<Self> {
        Self::generate(name.parse()?, rng)
    }

    /// Wraps a fixed variant, drawing its candidate set from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(variant: Variant, rng: &mut R) -> Result<Self> {
        let choices = variant.choices(rng)?;
        debug!("Generated {:?}", variant);
        Ok(Self { variant, choices })
    }

    pub fn kind(&self) -> VariantKind {
        self.variant.kind()
    }

    pub fn answer(&self) -> Answer {
        self.variant.answer()
    }

    pub fn tags(&self) -> &'static [&'static str] {
        self.variant.tags()
    }

    pub fn level(&self) -> Level {
        self.variant.level()
    }

    pub fn prompt(&self) -> Prompt {
        self.variant.prompt()
    }

    pub fn choices(&self) -> &[Answer] {
        &self.choices
    }

    /// Compares `submitted` against the correct answer. A pair submitted for
    /// a scalar problem, or the reverse, is an error rather than `false`.
    pub fn verify(&self, submitted: &Answer) -> Result<bool> {
        submitted.expect_shape(self.kind().answer_shape())?;
        Ok(*submitted == self.answer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::CHOICE_COUNT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn addition_parameters_stay_in_range() {
        let mut rng = rng();
        for _ in 0..200 {
            let p = Addition::generate(&mut rng);
            assert!((1..=10).contains(&p.a()) && (1..=10).contains(&p.b()));
            assert_eq!(p.answer(), p.a() + p.b());
        }
    }

    #[test]
    fn addition_scenario() {
        let addition = Addition::new(3, 4).unwrap();
        let problem = Problem::with_rng(Variant::Addition(addition), &mut rng()).unwrap();
        let prompt = problem.prompt();
        assert!(prompt.text.contains('3') && prompt.text.contains('4'));
        assert!(prompt.chart.is_none());
        assert_eq!(problem.verify(&Answer::Scalar(7)), Ok(true));
        assert_eq!(problem.verify(&Answer::Scalar(6)), Ok(false));
        assert_eq!(problem.tags(), &["Arithmetic"]);
        assert_eq!(problem.level(), Level::Elementary);
    }

    #[test]
    fn addition_rejects_out_of_range_addends() {
        assert!(matches!(
            Addition::new(0, 4),
            Err(QuizError::OutOfRange { name: "a", .. })
        ));
        assert!(Addition::new(10, 11).is_err());
    }

    #[test]
    fn line_slope_chart_passes_through_origin_point() {
        let mut rng = rng();
        for _ in 0..100 {
            let p = LineSlope::generate(&mut rng);
            let chart = p.chart();
            assert_eq!(chart.from, Point { x: -10, y: 5 });
            assert_eq!(chart.to.x, -5);
            assert_eq!(chart.to.y, p.slope() * 5 + 5);
            assert!((-5..=5).contains(&p.slope()));
        }
    }

    #[test]
    fn line_slope_scenario() {
        let mut rng = rng();
        for _ in 0..20 {
            let line = LineSlope::new(2).unwrap();
            let problem = Problem::with_rng(Variant::LineSlope(line), &mut rng).unwrap();
            let choices = problem.choices();
            assert_eq!(choices.iter().filter(|&&c| c == Answer::Scalar(2)).count(), 1);
            assert!(choices.iter().all(|c| match c {
                Answer::Scalar(n) => (-5..6).contains(n),
                Answer::Pair(_) => false,
            }));
        }
        let line = LineSlope::new(2).unwrap();
        let problem = Problem::with_rng(Variant::LineSlope(line), &mut rng).unwrap();
        assert!(problem.prompt().chart.is_some());
        assert_eq!(problem.verify(&Answer::Scalar(2)), Ok(true));
        assert_eq!(problem.verify(&Answer::Scalar(-2)), Ok(false));
    }

    #[test]
    fn quadratic_scenario() {
        let q = Quadratic::new(3, -2, 1).unwrap();
        assert_eq!(q.coefficients(), (1, 1, -6));
        assert_eq!(q.answer(), RootPair::new(-3, 2));
        assert_eq!(
            q.prompt().text,
            "What are the roots of the equation x^2 + x - 6 = 0?"
        );

        let problem = Problem::with_rng(Variant::Quadratic(q), &mut rng()).unwrap();
        assert_eq!(problem.verify(&Answer::pair(-3, 2)), Ok(true));
        assert_eq!(problem.verify(&Answer::pair(2, -3)), Ok(true));
        assert_eq!(problem.verify(&Answer::pair(3, -2)), Ok(false));
        assert_eq!(problem.verify(&Answer::pair(2, 2)), Ok(false));
    }

    #[test]
    fn quadratic_generation_invariants() {
        let mut rng = rng();
        for _ in 0..200 {
            let q = Quadratic::generate(&mut rng);
            assert_ne!(q.r0, q.r1);
            assert_ne!(q.k, 0);
            assert_eq!(q.answer(), RootPair::new(-q.r0, -q.r1));
            let (a, b, c) = q.coefficients();
            for root in [-q.r0, -q.r1] {
                assert_eq!(a * root * root + b * root + c, 0);
            }
        }
    }

    #[test]
    fn quadratic_rejects_degenerate_input() {
        assert_eq!(Quadratic::new(1, 2, 0), Err(QuizError::DegenerateQuadratic));
        assert_eq!(Quadratic::new(4, 4, 2), Err(QuizError::RepeatedRoot(4)));
        assert!(Quadratic::new(11, 0, 1).is_err());
    }

    #[test]
    fn quadratic_symmetric_roots_have_two_distinct_answers() {
        let mut rng = rng();
        for r in 1..=10 {
            let q = Quadratic::new(r, -r, 1).unwrap();
            assert_eq!(q.coefficients(), (1, 0, -r * r));
            assert_eq!(q.answer(), RootPair::new(-r, r));
            assert_eq!(q.answer().low(), -r);
            assert_eq!(q.answer().high(), r);

            let problem = Problem::with_rng(Variant::Quadratic(q), &mut rng).unwrap();
            assert_eq!(problem.verify(&Answer::pair(r, -r)), Ok(true));
            assert_eq!(problem.verify(&Answer::pair(r, r)), Ok(false));
            assert_eq!(problem.verify(&Answer::pair(-r, -r)), Ok(false));

            let choices = problem.choices();
            assert_eq!(choices.len(), 4);
            assert_eq!(choices.iter().collect::<HashSet<_>>().len(), 4);
            assert_eq!(choices.iter().filter(|&&c| c == problem.answer()).count(), 1);
        }
    }

    #[test]
    fn quadratic_prompt_drops_zero_middle_term() {
        let q = Quadratic::new(3, -3, -1).unwrap();
        assert_eq!(q.coefficients(), (-1, 0, 9));
        assert_eq!(
            q.prompt().text,
            "What are the roots of the equation -x^2 + 9 = 0?"
        );
    }

    #[test]
    fn polynomial_formatting() {
        assert_eq!(format_polynomial(-2, 0, 18), "-2x^2 + 18");
        assert_eq!(format_polynomial(-1, -3, 0), "-x^2 - 3x");
        assert_eq!(format_polynomial(5, -5, -10), "5x^2 - 5x - 10");
    }

    #[test]
    fn verify_rejects_wrong_shape() {
        let mut rng = rng();
        let quadratic = Problem::generate(VariantKind::Quadratic, &mut rng).unwrap();
        assert!(matches!(
            quadratic.verify(&Answer::Scalar(1)),
            Err(QuizError::ShapeMismatch { .. })
        ));
        let addition = Problem::generate(VariantKind::Addition, &mut rng).unwrap();
        assert!(matches!(
            addition.verify(&Answer::pair(1, 2)),
            Err(QuizError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn every_kind_offers_four_distinct_choices_including_answer() {
        let mut rng = rng();
        for kind in VariantKind::ALL {
            for _ in 0..50 {
                let problem = Problem::generate(kind, &mut rng).unwrap();
                let unique: HashSet<_> = problem.choices().iter().collect();
                assert_eq!(unique.len(), CHOICE_COUNT);
                let answer = problem.answer();
                assert_eq!(problem.choices().iter().filter(|&&c| c == answer).count(), 1);
                assert_eq!(problem.kind(), kind);
            }
        }
    }

    #[test]
    fn kind_names_parse() {
        assert_eq!("Line Slope".parse::<VariantKind>(), Ok(VariantKind::LineSlope));
        assert_eq!("line_slope".parse::<VariantKind>(), Ok(VariantKind::LineSlope));
        assert_eq!("QUADRATIC".parse::<VariantKind>(), Ok(VariantKind::Quadratic));
        assert_eq!(
            "division".parse::<VariantKind>(),
            Err(QuizError::UnknownVariant("division".to_string()))
        );
        let problem = Problem::create("Addition", &mut rng()).unwrap();
        assert_eq!(problem.kind(), VariantKind::Addition);
    }
}
