use crate::{chart, storage};
use eframe::egui;
use log::{error, info};
use mq_core::{
    Answer, AnswerShape, Phase, Quiz, QuizItem, QuizPlan, QuizSession, Selection, Stats,
    StatsStore, VariantKind,
};

const MAX_PROBLEMS: usize = 50;
const CORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(50, 160, 50);
const WRONG_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Random,
    ByProblem,
    QuickPractice,
}

/// What the user has typed or picked for one problem, before submission.
#[derive(Debug, Clone, PartialEq)]
enum Draft {
    Choice(Option<usize>),
    Scalar(String),
    Pair(String, String),
}

impl Draft {
    fn for_item(quiz: &Quiz, item: &QuizItem) -> Self {
        if quiz.is_multiple_choice() {
            return Draft::Choice(None);
        }
        match item.problem().kind().answer_shape() {
            AnswerShape::Scalar => Draft::Scalar(String::new()),
            AnswerShape::Pair => Draft::Pair(String::new(), String::new()),
        }
    }

    /// Blank or unparseable input is no answer.
    fn response(&self, choices: Option<&[Answer]>) -> Option<Answer> {
        match self {
            Draft::Choice(selected) => selected.and_then(|i| choices?.get(i).copied()),
            Draft::Scalar(text) => text.trim().parse().ok().map(Answer::Scalar),
            Draft::Pair(x, y) => Some(Answer::pair(
                x.trim().parse().ok()?,
                y.trim().parse().ok()?,
            )),
        }
    }
}

enum Screen {
    Configure,
    Answer,
    Score,
}

pub struct MathQuizApp {
    session: QuizSession,
    store: StatsStore,
    stats: Stats,
    tab: Tab,
    random_count: usize,
    by_problem: [usize; 3],
    quick_kinds: [bool; 3],
    quick_total: usize,
    multiple_choice: bool,
    drafts: Vec<Draft>,
    error: Option<String>,
    status: Option<String>,
    confirm_reset: bool,
}

impl Default for MathQuizApp {
    fn default() -> Self {
        let store = storage::open_store();
        let stats = store.load();
        info!(
            "Loaded stats: {} problems, {}% correct",
            stats.total_problems,
            stats.percent_correct()
        );

        Self {
            session: QuizSession::new(),
            store,
            stats,
            tab: Tab::Random,
            random_count: 5,
            by_problem: [1, 1, 1],
            quick_kinds: [true, false, false],
            quick_total: 5,
            multiple_choice: false,
            drafts: Vec::new(),
            error: None,
            status: None,
            confirm_reset: false,
        }
    }
}

impl MathQuizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn plan(&self) -> QuizPlan {
        let selection = match self.tab {
            Tab::Random => Selection::Random {
                count: self.random_count,
            },
            Tab::ByProblem => Selection::ByProblem {
                addition: self.by_problem[0],
                line_slope: self.by_problem[1],
                quadratic: self.by_problem[2],
            },
            Tab::QuickPractice => Selection::QuickPractice {
                kinds: VariantKind::ALL
                    .iter()
                    .zip(self.quick_kinds)
                    .filter(|(_, on)| *on)
                    .map(|(kind, _)| *kind)
                    .collect(),
                total: self.quick_total,
            },
        };
        QuizPlan::new(selection, self.multiple_choice)
    }

    fn start_quiz(&mut self) {
        let plan = self.plan();
        if let Err(e) = self.session.start(&plan, &mut rand::thread_rng()) {
            self.error = Some(e.to_string());
            return;
        }

        self.drafts = match self.session.quiz() {
            Some(quiz) => quiz
                .items()
                .iter()
                .map(|item| Draft::for_item(quiz, item))
                .collect(),
            None => Vec::new(),
        };
        self.error = None;
    }

    fn submit_answers(&mut self) {
        let responses: Vec<Option<Answer>> = match self.session.quiz() {
            Some(quiz) => quiz
                .items()
                .iter()
                .zip(&self.drafts)
                .map(|(item, draft)| draft.response(quiz.choices_for(item)))
                .collect(),
            None => return,
        };

        match self.session.submit(responses, &mut self.stats) {
            Ok(()) => {
                self.drafts.clear();
                self.error = None;
                self.save_stats();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn save_stats(&mut self) {
        match self.store.save(&self.stats) {
            Ok(()) => self.status = None,
            Err(e) => {
                error!("Failed to save stats: {}", e);
                self.status = Some(format!("Could not save stats: {}", e));
            }
        }
    }

    fn reset_stats(&mut self) {
        self.stats.reset();
        self.confirm_reset = false;
        match self.store.clear() {
            Ok(()) => {
                info!("Stats reset");
                self.status = None;
            }
            Err(e) => {
                error!("Failed to remove stats file: {}", e);
                self.status = Some(format!("Could not remove stats file: {}", e));
            }
        }
    }

    fn show_stats(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Your stats").strong());
        ui.horizontal(|ui| {
            ui.label(format!("Total problems: {}", self.stats.total_problems));
            ui.separator();
            ui.label(format!("Correct problems: {}", self.stats.correct_problems));
            ui.separator();
            ui.label(format!("Wrong problems: {}", self.stats.total_wrong()));
            ui.separator();
            ui.label(format!("Percentage correct: {}%", self.stats.percent_correct()));
        });

        if !self.stats.total_problems_by_tag.is_empty() {
            let by_tag = self
                .stats
                .total_problems_by_tag
                .iter()
                .map(|(tag, n)| format!("{}: {}", tag, n))
                .collect::<Vec<_>>()
                .join(", ");
            ui.label(format!("By topic: {}", by_tag));

            let by_kind = self
                .stats
                .by_kind()
                .iter()
                .map(|(kind, (attempted, correct))| format!("{} {}/{}", kind, correct, attempted))
                .collect::<Vec<_>>()
                .join(", ");
            if !by_kind.is_empty() {
                ui.label(format!("By problem: {}", by_kind));
            }
        }

        if self.confirm_reset {
            ui.horizontal(|ui| {
                ui.label("Reset all stats?");
                if ui.button("Yes, reset").clicked() {
                    self.reset_stats();
                }
                if ui.button("Cancel").clicked() {
                    self.confirm_reset = false;
                }
            });
        } else if ui.small_button("Reset Stats").clicked() {
            self.confirm_reset = true;
        }

        if let Some(status) = &self.status {
            ui.colored_label(WRONG_COLOR, status.as_str());
        }
    }

    fn show_config(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, Tab::Random, "Random");
            ui.selectable_value(&mut self.tab, Tab::ByProblem, "By Problem");
            ui.selectable_value(&mut self.tab, Tab::QuickPractice, "Quick Practice");
        });
        ui.add_space(10.0);

        match self.tab {
            Tab::Random => {
                ui.heading("Random Problem Set");
                ui.horizontal(|ui| {
                    ui.label("Problems");
                    ui.add(egui::DragValue::new(&mut self.random_count).range(0..=MAX_PROBLEMS));
                });
            }
            Tab::ByProblem => {
                ui.heading("By Problem");
                for (kind, count) in VariantKind::ALL.iter().zip(self.by_problem.iter_mut()) {
                    ui.horizontal(|ui| {
                        ui.label(format!("{} Problems", kind));
                        ui.add(egui::DragValue::new(count).range(0..=MAX_PROBLEMS));
                    });
                }
            }
            Tab::QuickPractice => {
                ui.heading("Quick Practice");
                ui.label("Choose question type(s)");
                ui.horizontal(|ui| {
                    for (kind, on) in VariantKind::ALL.iter().zip(self.quick_kinds.iter_mut()) {
                        ui.checkbox(on, kind.display_name());
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Total problems");
                    ui.add(egui::DragValue::new(&mut self.quick_total).range(0..=MAX_PROBLEMS));
                });
            }
        }

        ui.checkbox(&mut self.multiple_choice, "Multiple Choice Questions");
        ui.add_space(10.0);

        if ui
            .add_sized([120.0, 32.0], egui::Button::new("Start"))
            .clicked()
        {
            self.start_quiz();
        }
    }

    fn show_quiz(&mut self, ui: &mut egui::Ui) {
        let Some(quiz) = self.session.quiz() else {
            return;
        };

        if quiz.is_empty() {
            ui.label("This quiz has no problems.");
        }

        for (n, (item, draft)) in quiz.items().iter().zip(self.drafts.iter_mut()).enumerate() {
            ui.push_id(item.key(), |ui| {
                ui.group(|ui| {
                    let problem = item.problem();
                    let prompt = problem.prompt();
                    ui.label(
                        egui::RichText::new(format!(
                            "{}. {} ({})",
                            n + 1,
                            problem.kind(),
                            problem.level()
                        ))
                        .strong(),
                    );
                    ui.label(prompt.text.as_str());
                    if let Some(line) = &prompt.chart {
                        chart::line_chart(ui, line);
                    }
                    answer_input(ui, draft, quiz.choices_for(item));
                });
            });
            ui.add_space(6.0);
        }

        ui.add_space(10.0);
        let mut submit = false;
        let mut cancel = false;
        ui.horizontal(|ui| {
            submit = ui
                .add_sized([120.0, 32.0], egui::Button::new("Submit"))
                .clicked();
            cancel = ui.button("Cancel").clicked();
        });

        if submit {
            self.submit_answers();
        } else if cancel {
            self.session.reset();
            self.drafts.clear();
            self.error = None;
        }
    }

    fn show_scorecard(&mut self, ui: &mut egui::Ui) {
        let Some(card) = self.session.scorecard() else {
            return;
        };

        ui.heading(format!(
            "You got {} of {} right ({}%)",
            card.correct(),
            card.total(),
            card.percent()
        ));
        ui.add_space(10.0);

        for (n, outcome) in card.outcomes.iter().enumerate() {
            let (mark, color) = if outcome.correct {
                ("✔", CORRECT_COLOR)
            } else {
                ("✘", WRONG_COLOR)
            };
            ui.horizontal_wrapped(|ui| {
                ui.colored_label(color, format!("{} {}.", mark, n + 1));
                ui.label(outcome.prompt.text.as_str());
            });
            let given = outcome
                .response
                .map(|a| a.to_string())
                .unwrap_or_else(|| "no answer".to_string());
            if outcome.correct {
                ui.label(format!("Your answer: {}", given));
            } else {
                ui.label(format!(
                    "Your answer: {}, correct answer: {}",
                    given, outcome.expected
                ));
            }
            ui.add_space(4.0);
        }

        ui.add_space(10.0);
        if ui
            .add_sized([120.0, 32.0], egui::Button::new("New quiz"))
            .clicked()
        {
            self.session.reset();
        }
    }
}

fn answer_input(ui: &mut egui::Ui, draft: &mut Draft, choices: Option<&[Answer]>) {
    match draft {
        Draft::Choice(selected) => {
            ui.horizontal_wrapped(|ui| {
                for (i, choice) in choices.unwrap_or_default().iter().enumerate() {
                    ui.radio_value(selected, Some(i), choice.to_string());
                }
            });
        }
        Draft::Scalar(text) => {
            ui.horizontal(|ui| {
                ui.label("Answer");
                ui.add(egui::TextEdit::singleline(text).desired_width(80.0));
            });
        }
        Draft::Pair(x, y) => {
            ui.horizontal(|ui| {
                ui.label("x =");
                ui.add(egui::TextEdit::singleline(x).desired_width(60.0));
                ui.label("or x =");
                ui.add(egui::TextEdit::singleline(y).desired_width(60.0));
            });
        }
    }
}

impl eframe::App for MathQuizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Math Learning App");
                ui.add_space(10.0);
                self.show_stats(ui);
                ui.separator();
                ui.add_space(10.0);

                let screen = match self.session.phase() {
                    Phase::Configuring => Screen::Configure,
                    Phase::AwaitingAnswers(_) => Screen::Answer,
                    Phase::Scored(_) => Screen::Score,
                };
                match screen {
                    Screen::Configure => self.show_config(ui),
                    Screen::Answer => self.show_quiz(ui),
                    Screen::Score => self.show_scorecard(ui),
                }

                if let Some(err) = &self.error {
                    ui.add_space(10.0);
                    ui.colored_label(WRONG_COLOR, err.as_str());
                }
            });
        });
    }
}
