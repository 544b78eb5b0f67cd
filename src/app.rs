//! Main application UI.
//! Four tabs (add, review, quiz, all cards) over a single card store.
//! The store is re-read on every frame; all interaction state lives in the session structs.

use eframe::egui;
use flashcards_app::database::CardStore;
use flashcards_app::error::StoreError;
use flashcards_app::export::json::{export_json_to_path, import_json};
use flashcards_app::models::{
    CardId, Flashcard, Outcome, QuizFeedback, QuizSession, ReviewSession, StudyCalendar,
    select_due,
};
use log::{error, warn};

/// Application tabs
#[derive(Default, Clone, Copy, PartialEq, Eq)]
enum Tab {
    #[default]
    Add,
    Review,
    Quiz,
    AllCards,
}

/// One-line feedback shown under the tab bar
enum Status {
    Info(String),
    Warning(String),
    Error(String),
}

/// Main application state
pub struct MyApp {
    store: CardStore,
    calendar: StudyCalendar,
    current_tab: Tab,

    new_question: String,
    new_answer: String,

    review: ReviewSession,
    quiz: QuizSession,

    status: Option<Status>,
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let cards = match self.store.load_all() {
            Ok(cards) => cards,
            Err(e) => {
                self.render_load_error(ctx, &e);
                return;
            }
        };

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.render_toolbar(ui, &cards);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Flashcard Learning App");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Add, "Add a Flashcard");
                ui.selectable_value(&mut self.current_tab, Tab::Review, "Review Flashcards");
                ui.selectable_value(&mut self.current_tab, Tab::Quiz, "Quiz Mode");
                ui.selectable_value(&mut self.current_tab, Tab::AllCards, "All Flashcards");
            });
            ui.separator();

            self.render_status(ui);

            match self.current_tab {
                Tab::Add => self.render_add_tab(ui),
                Tab::Review => self.render_review_tab(ui, &cards),
                Tab::Quiz => self.render_quiz_tab(ui, &cards),
                Tab::AllCards => self.render_all_cards_tab(ui, &cards),
            }
        });

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }
    }
}

impl MyApp {
    pub fn new(store: CardStore) -> Self {
        Self {
            store,
            calendar: StudyCalendar::default(),
            current_tab: Tab::default(),
            new_question: String::new(),
            new_answer: String::new(),
            review: ReviewSession::default(),
            quiz: QuizSession::default(),
            status: None,
            show_confirmation_dialog: false,
            allowed_to_close: false,
        }
    }

    /// Records an error from the store and shows it to the user
    fn report(&mut self, context: &str, e: &StoreError) {
        error!("{context}: {e}");
        self.status = Some(Status::Error(format!("{context}: {e}")));
    }

    /// Shown instead of the tabs when the collection cannot be read
    fn render_load_error(&mut self, ctx: &egui::Context, e: &StoreError) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Could not load flashcards");
            ui.colored_label(egui::Color32::RED, e.to_string());
            ui.label("Fix or move the data file, then retry.");
            if ui.button("Retry").clicked() {
                ctx.request_repaint();
            }
        });
    }

    /// Current (possibly simulated) date, "Next Day" and import/export
    fn render_toolbar(&mut self, ui: &mut egui::Ui, cards: &[Flashcard]) {
        ui.horizontal(|ui| {
            ui.label(self.calendar.today().format("%Y-%m-%d").to_string());

            if ui.button("Next Day").clicked() {
                self.calendar.advance_day();
                self.review.finish();
            }

            ui.separator();

            if ui.button("Export").clicked() {
                self.handle_export(cards);
            }
            if ui.button("Import").clicked() {
                self.handle_import();
            }
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let mut dismiss = false;
        if let Some(status) = &self.status {
            ui.horizontal(|ui| {
                let (color, msg) = match status {
                    Status::Info(msg) => (egui::Color32::DARK_GREEN, msg),
                    Status::Warning(msg) => (egui::Color32::from_rgb(200, 140, 0), msg),
                    Status::Error(msg) => (egui::Color32::RED, msg),
                };
                ui.colored_label(color, msg.as_str());
                if ui.small_button("x").clicked() {
                    dismiss = true;
                }
            });
            ui.separator();
        }
        if dismiss {
            self.status = None;
        }
    }

    fn render_add_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add a Flashcard");

        ui.horizontal(|ui| {
            ui.label("Question:");
            ui.text_edit_singleline(&mut self.new_question);
        });
        ui.horizontal(|ui| {
            ui.label("Answer:");
            ui.text_edit_singleline(&mut self.new_answer);
        });

        if ui.button("Add Flashcard").clicked() {
            let today = self.calendar.today();
            match self.store.add(&self.new_question, &self.new_answer, today) {
                Ok(_) => {
                    self.status = Some(Status::Info("Flashcard added.".to_string()));
                    self.new_question.clear();
                    self.new_answer.clear();
                }
                Err(StoreError::Validation(e)) => {
                    warn!("rejected new card: {e}");
                    self.status = Some(Status::Warning(
                        "Please enter both question and answer.".to_string(),
                    ));
                }
                Err(e) => self.report("Could not add flashcard", &e),
            }
        }
    }

    fn render_review_tab(&mut self, ui: &mut egui::Ui, cards: &[Flashcard]) {
        ui.heading("Review Due Flashcards");

        let today = self.calendar.today();
        let due = select_due(cards, today);
        let Some(card) = self.review.draw(&due, &mut rand::thread_rng()) else {
            ui.label("No flashcards are due for review today.");
            return;
        };
        let card_id = card.id;
        let question = card.question.clone();
        let answer = card.answer.clone();

        ui.label(format!("{} card(s) due", due.len()));
        ui.add_space(10.0);

        // Store actions to execute after UI rendering
        let mut action_reveal = false;
        let mut action_outcome: Option<Outcome> = None;

        ui.group(|ui| {
            ui.set_min_height(150.0);
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.heading("Question:");
                ui.label(question.as_str());
                ui.add_space(20.0);

                if self.review.answer_revealed {
                    ui.heading("Answer:");
                    ui.label(answer.as_str());
                } else {
                    ui.label("(Click 'Show Answer' to reveal)");
                }
                ui.add_space(10.0);
            });
        });

        ui.add_space(10.0);

        if !self.review.answer_revealed {
            if ui.button("Show Answer").clicked() {
                action_reveal = true;
            }
        } else {
            ui.horizontal(|ui| {
                if ui.button("I knew this").clicked() {
                    action_outcome = Some(Outcome::Correct);
                }
                if ui.button("I forgot").clicked() {
                    action_outcome = Some(Outcome::Incorrect);
                }
            });
        }

        if action_reveal {
            self.review.reveal();
        }
        if let Some(outcome) = action_outcome {
            self.handle_outcome(card_id, outcome);
        }
    }

    fn handle_outcome(&mut self, card_id: CardId, outcome: Outcome) {
        let today = self.calendar.today();
        match self.store.record_review(card_id, outcome, today) {
            Ok(Some(card)) => {
                self.status = Some(Status::Info(format!(
                    "Next review of '{}' on {} (in {} day(s)).",
                    card.question, card.next_review, card.interval
                )));
            }
            Ok(None) => {
                warn!("reviewed card {card_id} no longer exists");
            }
            Err(e) => self.report("Could not save review", &e),
        }
        self.review.finish();
    }

    fn render_quiz_tab(&mut self, ui: &mut egui::Ui, cards: &[Flashcard]) {
        ui.heading("Quiz Mode");

        let mut rng = rand::thread_rng();
        let Some(card) = self.quiz.current_card(cards, &mut rng).cloned() else {
            ui.label("No flashcards available. Add some first.");
            return;
        };

        ui.label(format!("Question: {}", card.question));
        ui.horizontal(|ui| {
            ui.label("Your Answer:");
            ui.text_edit_singleline(&mut self.quiz.input);
        });

        if ui.button("Check Answer").clicked() {
            self.quiz.check(&card);
        }

        let mut action_next = false;
        if let Some(feedback) = &self.quiz.feedback {
            match feedback {
                QuizFeedback::Correct => {
                    ui.colored_label(egui::Color32::DARK_GREEN, "Correct!");
                }
                QuizFeedback::Incorrect { expected } => {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("Incorrect. Correct answer: {expected}"),
                    );
                }
            }
            if ui.button("Next Question").clicked() {
                action_next = true;
            }
        }

        if action_next {
            self.quiz.next(cards, &mut rng);
        }
    }

    fn render_all_cards_tab(&mut self, ui: &mut egui::Ui, cards: &[Flashcard]) {
        ui.heading(format!("All Flashcards ({})", cards.len()));

        if cards.is_empty() {
            ui.label("No flashcards available yet.");
            return;
        }

        let mut action_delete: Option<CardId> = None;

        egui::ScrollArea::vertical()
            .id_source("all_cards_list")
            .show(ui, |ui| {
                for card in cards {
                    ui.push_id(card.id, |ui| {
                        ui.collapsing(card.question.as_str(), |ui| {
                            ui.label(format!("Answer: {}", card.answer));
                            ui.label(format!("Correct Count: {}", card.correct_count));
                            ui.label(format!("Interval: {} days", card.interval));
                            ui.label(format!("Next Review: {}", card.next_review));
                            if ui.button("Delete").clicked() {
                                action_delete = Some(card.id);
                            }
                        });
                    });
                }
            });

        if let Some(id) = action_delete {
            match self.store.delete(id) {
                Ok(_) => self.status = Some(Status::Info("Flashcard deleted.".to_string())),
                Err(e) => self.report("Could not delete flashcard", &e),
            }
        }
    }

    /// Handles collection export to a JSON file
    fn handle_export(&mut self, cards: &[Flashcard]) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("flashcards.json")
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        match export_json_to_path(cards, &path) {
            Ok(()) => {
                self.status = Some(Status::Info(format!(
                    "Exported {} cards to {}.",
                    cards.len(),
                    path.display()
                )));
            }
            Err(e) => self.report("Export failed", &e),
        }
    }

    /// Handles import of cards from a JSON file, appending them to the collection
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        match import_json(&path).and_then(|cards| self.store.import(cards)) {
            Ok(count) => {
                self.status = Some(Status::Info(format!("Imported {count} cards.")));
            }
            Err(e) => self.report("Import failed", &e),
        }
    }
}
