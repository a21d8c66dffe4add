//! Main application UI and state management.
//! Handles list and word management screens and the learning session screen.

use chrono::NaiveDate;
use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use vocab_app::config::AppConfig;
use vocab_app::database::{Subscription, VocabStore};
use vocab_app::error::AppError;
use vocab_app::export::json::{ListExport, export_list_to_path, import_list};
use vocab_app::models::{
    Feedback, LearningSession, ListId, ListPatch, PromptSide, ReviewSchedule, SessionMode,
    SessionResult, Verdict, VocabularyList, Word, WordId, WordPatch, WordScope, select_words,
};

const NOTICE_TTL: Duration = Duration::from_secs(4);
const DATE_FORMAT: &str = "%Y-%m-%d";
const GREEN: egui::Color32 = egui::Color32::from_rgb(82, 196, 26);
const RED: egui::Color32 = egui::Color32::from_rgb(235, 47, 150);

/// Application screen states
#[derive(Clone, Copy, Default, PartialEq)]
enum AppScreen {
    #[default]
    Lists,
    Words(ListId),
    Session,
}

struct Notice {
    text: String,
    shown_at: Instant,
}

#[derive(Default)]
struct ListForm {
    editing: Option<ListId>,
    name: String,
    anchor: String,
    error: Option<String>,
}

struct WordEdit {
    id: WordId,
    word: String,
    meaning: String,
    error: Option<String>,
}

enum PendingDelete {
    List(ListId, String),
    Words,
}

/// User actions collected while drawing and applied afterwards
enum Action {
    OpenList(ListId),
    BackToLists,
    NewList,
    EditList(ListId),
    SaveListForm,
    CancelListForm,
    AskDeleteList(ListId, String),
    ConfirmDelete,
    CancelDelete,
    AdvanceDay,
    ResetDay,
    ExportList(ListId),
    ImportList,
    AddBulk,
    EditWord(WordId),
    SaveWordEdit,
    CancelWordEdit,
    ToggleWord(WordId, bool),
    AskDeleteWords,
    StartSession(WordScope),
    SubmitTyping,
    SubmitChoice(usize),
    SubmitRetype,
    Flip,
    NextCard,
    PreviousCard,
    Restart,
    SwitchMode(SessionMode),
    ExitSession,
}

/// Main application state
pub struct VocabApp {
    store: VocabStore,
    config: AppConfig,
    screen: AppScreen,
    today: NaiveDate,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,

    lists: Vec<VocabularyList>,
    lists_rx: Option<Receiver<Vec<VocabularyList>>>,
    lists_sub: Option<Subscription>,
    list_form: Option<ListForm>,

    current_list: Option<VocabularyList>,
    words: Vec<Word>,
    words_rx: Option<Receiver<Vec<Word>>>,
    words_sub: Option<Subscription>,
    bulk_input: String,
    selected: BTreeSet<WordId>,
    word_edit: Option<WordEdit>,
    session_mode: SessionMode,
    last_result: Option<SessionResult>,

    session: Option<LearningSession>,
    answer_input: String,
    last_verdict: Option<Verdict>,
    result_logged: bool,

    pending_delete: Option<PendingDelete>,
    notice: Option<Notice>,
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Empty input means no review schedule
fn parse_anchor(text: &str) -> Result<Option<NaiveDate>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("'{text}' is not a date (YYYY-MM-DD)"))
}

fn schedule_line(schedule: &ReviewSchedule) -> String {
    if schedule.is_empty() {
        return "No review schedule".to_string();
    }
    let dates: Vec<String> = schedule.dates().map(format_date).collect();
    format!("Reviews: {}", dates.join(", "))
}

impl eframe::App for VocabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_subscriptions();
        self.tick_session(ctx);

        let mut actions = Vec::new();
        self.render_notice(ctx);
        match self.screen {
            AppScreen::Lists => self.render_lists_screen(ctx, &mut actions),
            AppScreen::Words(_) => self.render_words_screen(ctx, &mut actions),
            AppScreen::Session => self.render_session_screen(ctx, &mut actions),
        }
        self.render_dialogs(ctx, &mut actions);

        for action in actions {
            self.apply(action);
        }

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

impl VocabApp {
    /// Creates the application and opens the list view
    pub fn new(store: VocabStore, config: AppConfig) -> Self {
        let today = store
            .current_date()
            .unwrap_or_else(|_| chrono::Local::now().date_naive());
        let mut app = Self {
            store,
            config,
            screen: AppScreen::Lists,
            today,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            lists: Vec::new(),
            lists_rx: None,
            lists_sub: None,
            list_form: None,
            current_list: None,
            words: Vec::new(),
            words_rx: None,
            words_sub: None,
            bulk_input: String::new(),
            selected: BTreeSet::new(),
            word_edit: None,
            session_mode: SessionMode::Typing,
            last_result: None,
            session: None,
            answer_input: String::new(),
            last_verdict: None,
            result_logged: false,
            pending_delete: None,
            notice: None,
        };
        app.open_lists();
        app
    }

    fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!(message = %text, "shown to user");
        self.notice = Some(Notice {
            text,
            shown_at: Instant::now(),
        });
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Tears down the live queries of the current view
    fn close_views(&mut self) {
        if let Some(sub) = self.lists_sub.take() {
            self.store.unsubscribe(sub);
        }
        if let Some(sub) = self.words_sub.take() {
            self.store.unsubscribe(sub);
        }
        self.lists_rx = None;
        self.words_rx = None;
    }

    fn open_lists(&mut self) {
        self.close_views();
        self.screen = AppScreen::Lists;
        self.current_list = None;

        let (tx, rx) = mpsc::channel();
        let owner = self.config.owner_id.clone();
        match self.store.subscribe_lists(&owner, move |lists| {
            let _ = tx.send(lists.to_vec());
        }) {
            Ok(sub) => {
                self.lists_sub = Some(sub);
                self.lists_rx = Some(rx);
            }
            Err(err) => self.notify(format!("Could not load lists: {err}")),
        }
    }

    fn open_words(&mut self, list_id: ListId) {
        let list = match self.store.list(list_id) {
            Ok(list) => list,
            Err(err) => {
                self.notify(format!("Could not open list: {err}"));
                return;
            }
        };

        self.close_views();
        self.screen = AppScreen::Words(list_id);
        self.current_list = Some(list);
        self.selected.clear();
        self.word_edit = None;
        self.last_result = self
            .store
            .session_results(&self.config.owner_id, list_id)
            .ok()
            .and_then(|results| results.into_iter().next());

        let (tx, rx) = mpsc::channel();
        let owner = self.config.owner_id.clone();
        match self.store.subscribe_words(&owner, list_id, move |words| {
            let _ = tx.send(words.to_vec());
        }) {
            Ok(sub) => {
                self.words_sub = Some(sub);
                self.words_rx = Some(rx);
            }
            Err(err) => self.notify(format!("Could not load words: {err}")),
        }
    }

    fn drain_subscriptions(&mut self) {
        if let Some(rx) = &self.lists_rx {
            while let Ok(lists) = rx.try_recv() {
                self.lists = lists;
            }
        }
        if let Some(rx) = &self.words_rx {
            while let Ok(words) = rx.try_recv() {
                self.selected
                    .retain(|id| words.iter().any(|word| word.id == *id));
                self.words = words;
            }
        }
    }

    fn tick_session(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let now = Instant::now();
        if session.tick(now) {
            self.answer_input.clear();
            self.last_verdict = None;
        }
        if let Some(remaining) = session.remaining_delay(now) {
            ctx.request_repaint_after(remaining);
        }

        if self.result_logged
            || !self.config.log_session_results
            || !session.mode().is_scored()
        {
            return;
        }
        if let Some(summary) = session.summary() {
            self.result_logged = true;
            let result = SessionResult {
                owner_id: self.config.owner_id.clone(),
                list_id: session.list_id(),
                mode: session.mode(),
                score: summary.score,
                total_words: summary.total as u32,
                timestamp: chrono::Utc::now(),
            };
            if let Err(err) = self.store.save_session_result(&result) {
                warn!(error = %err, "failed to log session result");
            }
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::OpenList(id) => self.open_words(id),
            Action::BackToLists => self.open_lists(),
            Action::NewList => {
                self.list_form = Some(ListForm::default());
            }
            Action::EditList(id) => {
                if let Some(list) = self.lists.iter().find(|l| l.id == id) {
                    self.list_form = Some(ListForm {
                        editing: Some(id),
                        name: list.name.clone(),
                        anchor: list.schedule.anchor().map(format_date).unwrap_or_default(),
                        error: None,
                    });
                }
            }
            Action::SaveListForm => self.save_list_form(),
            Action::CancelListForm => self.list_form = None,
            Action::AskDeleteList(id, name) => {
                self.pending_delete = Some(PendingDelete::List(id, name));
            }
            Action::AskDeleteWords => {
                if !self.selected.is_empty() {
                    self.pending_delete = Some(PendingDelete::Words);
                }
            }
            Action::ConfirmDelete => self.confirm_delete(),
            Action::CancelDelete => self.pending_delete = None,
            Action::AdvanceDay => match self.store.advance_day() {
                Ok(date) => self.today = date,
                Err(err) => self.notify(format!("Could not change date: {err}")),
            },
            Action::ResetDay => match self.store.reset_current_date() {
                Ok(date) => self.today = date,
                Err(err) => self.notify(format!("Could not change date: {err}")),
            },
            Action::ExportList(id) => self.handle_export(id),
            Action::ImportList => self.handle_import(),
            Action::AddBulk => self.add_bulk(),
            Action::EditWord(id) => {
                if let Some(word) = self.words.iter().find(|w| w.id == id) {
                    self.word_edit = Some(WordEdit {
                        id,
                        word: word.word.clone(),
                        meaning: word.meaning.clone(),
                        error: None,
                    });
                }
            }
            Action::SaveWordEdit => self.save_word_edit(),
            Action::CancelWordEdit => self.word_edit = None,
            Action::ToggleWord(id, checked) => {
                if checked {
                    self.selected.insert(id);
                } else {
                    self.selected.remove(&id);
                }
            }
            Action::StartSession(scope) => self.start_session(scope),
            Action::SubmitTyping => {
                if let Some(session) = self.session.as_mut() {
                    match session.submit_typing(&self.answer_input, Instant::now(), &mut self.store) {
                        Ok(verdict) => self.last_verdict = Some(verdict),
                        Err(err) => warn!(error = %err, "answer ignored"),
                    }
                }
            }
            Action::SubmitChoice(option) => {
                if let Some(session) = self.session.as_mut() {
                    match session.submit_choice(option, Instant::now(), &mut self.store) {
                        Ok(verdict) => self.last_verdict = Some(verdict),
                        Err(err) => warn!(error = %err, "answer ignored"),
                    }
                }
            }
            Action::SubmitRetype => {
                if let Some(session) = self.session.as_mut() {
                    match session.submit_retype(&self.answer_input, &mut self.store) {
                        Ok(verdict) => self.last_verdict = Some(verdict),
                        Err(err) => warn!(error = %err, "answer ignored"),
                    }
                }
                self.answer_input.clear();
            }
            Action::Flip => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(err) = session.flip() {
                        warn!(error = %err, "flip ignored");
                    }
                }
            }
            Action::NextCard => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(err) = session.next_card() {
                        warn!(error = %err, "next card ignored");
                    }
                }
            }
            Action::PreviousCard => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(err) = session.previous_card() {
                        warn!(error = %err, "previous card ignored");
                    }
                }
            }
            Action::Restart => {
                if let Some(session) = self.session.as_mut() {
                    session.restart();
                }
                self.reset_session_inputs();
            }
            Action::SwitchMode(mode) => {
                self.session_mode = mode;
                if let Some(session) = self.session.as_mut() {
                    if let Err(err) = session.restart_with_mode(mode) {
                        warn!(error = %err, "mode switch ignored");
                    }
                }
                self.reset_session_inputs();
            }
            Action::ExitSession => {
                let list_id = self.session.take().map(|s| s.list_id());
                self.reset_session_inputs();
                match list_id {
                    Some(id) => self.open_words(id),
                    None => self.open_lists(),
                }
            }
        }
    }

    fn reset_session_inputs(&mut self) {
        self.answer_input.clear();
        self.last_verdict = None;
        self.result_logged = false;
    }

    fn save_list_form(&mut self) {
        let Some(form) = self.list_form.as_mut() else {
            return;
        };
        let anchor = match parse_anchor(&form.anchor) {
            Ok(anchor) => anchor,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };

        let result = match form.editing {
            Some(id) => self
                .store
                .update_list(
                    id,
                    ListPatch {
                        name: Some(form.name.clone()),
                        schedule: Some(ReviewSchedule::from_anchor(anchor)),
                    },
                )
                .map(|_| ()),
            None => self
                .store
                .create_list(&self.config.owner_id, &form.name, anchor)
                .map(|_| ()),
        };

        match result {
            Ok(()) => self.list_form = None,
            Err(AppError::Validation(message)) => form.error = Some(message),
            Err(err) => self.notify(format!("Could not save list: {err}")),
        }
    }

    fn confirm_delete(&mut self) {
        match self.pending_delete.take() {
            Some(PendingDelete::List(id, name)) => match self.store.delete_list(id) {
                Ok(words) => self.info(format!("Deleted '{name}' and {words} words")),
                Err(err) => self.notify(format!("Could not delete list: {err}")),
            },
            Some(PendingDelete::Words) => {
                let ids: Vec<WordId> = self.selected.iter().copied().collect();
                match self.store.delete_words(&ids) {
                    Ok(_) => self.selected.clear(),
                    Err(err) => self.notify(format!("Could not delete words: {err}")),
                }
            }
            None => {}
        }
    }

    fn add_bulk(&mut self) {
        let AppScreen::Words(list_id) = self.screen else {
            return;
        };
        if self.bulk_input.trim().is_empty() {
            return;
        }
        match self
            .store
            .add_words_bulk(&self.config.owner_id, list_id, &self.bulk_input)
        {
            Ok(words) if words.is_empty() => {
                self.info("No lines matched 'word<two spaces or tab>meaning'")
            }
            Ok(_) => self.bulk_input.clear(),
            Err(err) => self.notify(format!("Could not add words: {err}")),
        }
    }

    fn save_word_edit(&mut self) {
        let Some(edit) = self.word_edit.as_mut() else {
            return;
        };
        let patch = WordPatch {
            word: Some(edit.word.clone()),
            meaning: Some(edit.meaning.clone()),
        };
        match self.store.update_word(edit.id, patch) {
            Ok(_) => self.word_edit = None,
            Err(AppError::Validation(message)) => edit.error = Some(message),
            Err(err) => self.notify(format!("Could not update word: {err}")),
        }
    }

    /// Starts a learning session with the chosen words of the open list
    fn start_session(&mut self, scope: WordScope) {
        let Some(list) = self.current_list.clone() else {
            return;
        };
        let words = select_words(scope, &list, &self.words, self.today);

        match LearningSession::start(
            list.id,
            list.name.clone(),
            words,
            self.session_mode,
            self.config.session_options(),
            StdRng::from_os_rng(),
        ) {
            Ok(session) => {
                self.close_views();
                self.session = Some(session);
                self.reset_session_inputs();
                self.screen = AppScreen::Session;
            }
            Err(err) => self.info(err.to_string()),
        }
    }

    /// Handles list export to JSON file
    fn handle_export(&mut self, list_id: ListId) {
        let Some(list) = self.lists.iter().find(|l| l.id == list_id).cloned() else {
            return;
        };
        let words = match self.store.words(&self.config.owner_id, list_id) {
            Ok(words) => words,
            Err(err) => {
                self.notify(format!("Export failed: {err}"));
                return;
            }
        };

        // Open file save dialog
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", list.name))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            match export_list_to_path(&ListExport::from_list(&list, &words), &path) {
                Ok(()) => self.info(format!("List '{}' exported successfully!", list.name)),
                Err(err) => self.notify(format!("Export failed: {err}")),
            }
        }
    }

    /// Handles list import from JSON file
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        let export = match import_list(&path) {
            Ok(export) => export,
            Err(err) => {
                self.notify(format!(
                    "Import failed: {err}. Expected {{ \"name\": ..., \"words\": [{{ \"word\": ..., \"meaning\": ... }}] }}"
                ));
                return;
            }
        };

        if self.lists.iter().any(|l| l.name == export.name) {
            self.notify(format!(
                "List '{}' already exists! Please rename it in the JSON file.",
                export.name
            ));
            return;
        }

        match self
            .store
            .import_list(&self.config.owner_id, &export.name, &export.pairs())
        {
            Ok(list) => {
                info!(list_id = list.id.0, "list imported from file");
                self.info(format!(
                    "List '{}' imported successfully with {} words!",
                    list.name,
                    export.words.len()
                ));
            }
            Err(err) => self.notify(format!("Import failed: {err}")),
        }
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= NOTICE_TTL);
        if expired {
            self.notice = None;
        }
        if let Some(notice) = &self.notice {
            egui::TopBottomPanel::bottom("notice").show(ctx, |ui| {
                ui.label(&notice.text);
            });
            ctx.request_repaint_after(NOTICE_TTL.saturating_sub(notice.shown_at.elapsed()));
        }
    }

    /// Renders the list overview with list management
    fn render_lists_screen(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Today: {}", format_date(self.today)));
                if ui.button("Next Day").clicked() {
                    actions.push(Action::AdvanceDay);
                }
                if ui.button("Today").clicked() {
                    actions.push(Action::ResetDay);
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("New List").clicked() {
                    actions.push(Action::NewList);
                }
                if ui.button("Import List").clicked() {
                    actions.push(Action::ImportList);
                }
            });
            ui.separator();

            ui.heading(format!("Vocabulary Lists ({})", self.lists.len()));

            egui::ScrollArea::vertical()
                .id_salt("lists")
                .show(ui, |ui| {
                    if self.lists.is_empty() {
                        ui.label("No lists yet. Create one to start adding words.");
                    }
                    for list in &self.lists {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.strong(&list.name);
                                if list.is_due_on(self.today) {
                                    ui.colored_label(RED, "Review due today");
                                } else if let Some(next) = list.schedule.next_review_after(self.today) {
                                    ui.weak(format!("Next review {}", format_date(next)));
                                }
                            });
                            ui.small(schedule_line(&list.schedule));
                            ui.horizontal(|ui| {
                                if ui.button("Open").clicked() {
                                    actions.push(Action::OpenList(list.id));
                                }
                                if ui.button("Edit").clicked() {
                                    actions.push(Action::EditList(list.id));
                                }
                                if ui.button("Export").clicked() {
                                    actions.push(Action::ExportList(list.id));
                                }
                                if ui.button("Delete").clicked() {
                                    actions.push(Action::AskDeleteList(list.id, list.name.clone()));
                                }
                            });
                        });
                    }
                });
        });
    }

    /// Renders the words of the open list and the session launchers
    fn render_words_screen(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let Some(list) = self.current_list.clone() else {
            return;
        };
        let due_today = list.is_due_on(self.today);
        let new_count = self.words.iter().filter(|w| w.is_new()).count();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("< Lists").clicked() {
                    actions.push(Action::BackToLists);
                }
                ui.heading(&list.name);
            });
            ui.small(schedule_line(&list.schedule));
            if let Some(result) = &self.last_result {
                ui.small(format!(
                    "Last session ({}): {} / {}",
                    result.mode.label(),
                    result.score,
                    result.total_words
                ));
            }
            ui.separator();

            ui.heading("Learn");
            ui.horizontal(|ui| {
                for mode in SessionMode::ALL {
                    ui.selectable_value(&mut self.session_mode, mode, mode.label());
                }
            });
            ui.horizontal(|ui| {
                if ui.button(format!("All words ({})", self.words.len())).clicked() {
                    actions.push(Action::StartSession(WordScope::All));
                }
                if ui.button(format!("New words ({new_count})")).clicked() {
                    actions.push(Action::StartSession(WordScope::New));
                }
                let due_label = if due_today {
                    format!("Due today ({})", self.words.len())
                } else {
                    "Nothing due today".to_string()
                };
                if ui.add_enabled(due_today, egui::Button::new(due_label)).clicked() {
                    actions.push(Action::StartSession(WordScope::Due));
                }
            });
            ui.separator();

            ui.heading("Add Words");
            ui.add(
                egui::TextEdit::multiline(&mut self.bulk_input)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("word  meaning (two spaces or a tab), one per line"),
            );
            if ui.button("Add").clicked() {
                actions.push(Action::AddBulk);
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.heading(format!("Words ({})", self.words.len()));
                let selected = self.selected.len();
                if ui
                    .add_enabled(selected > 0, egui::Button::new(format!("Delete selected ({selected})")))
                    .clicked()
                {
                    actions.push(Action::AskDeleteWords);
                }
            });

            egui::ScrollArea::vertical()
                .id_salt("words")
                .show(ui, |ui| {
                    for word in &self.words {
                        ui.horizontal(|ui| {
                            let mut checked = self.selected.contains(&word.id);
                            if ui.checkbox(&mut checked, "").changed() {
                                actions.push(Action::ToggleWord(word.id, checked));
                            }

                            match self.word_edit.as_mut() {
                                Some(edit) if edit.id == word.id => {
                                    ui.text_edit_singleline(&mut edit.word);
                                    ui.text_edit_singleline(&mut edit.meaning);
                                    if ui.button("Save").clicked() {
                                        actions.push(Action::SaveWordEdit);
                                    }
                                    if ui.button("Cancel").clicked() {
                                        actions.push(Action::CancelWordEdit);
                                    }
                                    if let Some(error) = &edit.error {
                                        ui.colored_label(RED, error);
                                    }
                                }
                                _ => {
                                    ui.strong(&word.word);
                                    ui.label(&word.meaning);
                                    ui.colored_label(GREEN, format!("✔ {}", word.correct_count));
                                    ui.colored_label(RED, format!("✘ {}", word.incorrect_count));
                                    if ui.small_button("Edit").clicked() {
                                        actions.push(Action::EditWord(word.id));
                                    }
                                }
                            }
                        });
                    }
                });
        });
    }

    /// Renders the learning session screen for the active mode
    fn render_session_screen(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("< Back").clicked() {
                    actions.push(Action::ExitSession);
                }
                ui.heading(format!("Learning: {}", session.list_name()));
            });
            if !session.is_finished() {
                ui.horizontal(|ui| {
                    for mode in SessionMode::ALL {
                        if ui.selectable_label(session.mode() == mode, mode.label()).clicked()
                            && session.mode() != mode
                        {
                            actions.push(Action::SwitchMode(mode));
                        }
                    }
                });
            }
            ui.separator();

            if let Some(summary) = session.summary() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading(format!(
                        "Session Complete! You scored {} out of {}",
                        summary.score, summary.total
                    ));
                    ui.add_space(20.0);
                    if ui.button("Learn Again").clicked() {
                        actions.push(Action::Restart);
                    }
                    if ui.button("Back to List").clicked() {
                        actions.push(Action::ExitSession);
                    }
                });
                return;
            }

            let Some(word) = session.current_word() else {
                return;
            };

            match session.mode() {
                SessionMode::Flashcard => {
                    ui.add(egui::ProgressBar::new(
                        (session.index() + 1) as f32 / session.total() as f32,
                    ));
                    ui.label(format!("{} / {}", session.index() + 1, session.total()));
                    ui.add_space(20.0);

                    ui.group(|ui| {
                        ui.set_min_height(200.0);
                        ui.vertical_centered(|ui| {
                            ui.add_space(60.0);
                            let face = if session.is_flipped() {
                                &word.meaning
                            } else {
                                &word.word
                            };
                            ui.label(egui::RichText::new(face).size(32.0).strong());
                        });
                    });
                    ui.add_space(20.0);

                    ui.horizontal(|ui| {
                        if ui.add_enabled(session.index() > 0, egui::Button::new("<")).clicked() {
                            actions.push(Action::PreviousCard);
                        }
                        if ui.button("Flip (Space)").clicked() {
                            actions.push(Action::Flip);
                        }
                        let has_next = session.index() + 1 < session.total();
                        if ui.add_enabled(has_next, egui::Button::new(">")).clicked() {
                            actions.push(Action::NextCard);
                        }
                    });

                    ctx.input(|i| {
                        if i.key_pressed(egui::Key::Space) {
                            actions.push(Action::Flip);
                        }
                        if i.key_pressed(egui::Key::ArrowRight) {
                            actions.push(Action::NextCard);
                        }
                        if i.key_pressed(egui::Key::ArrowLeft) {
                            actions.push(Action::PreviousCard);
                        }
                    });
                }
                SessionMode::Typing => {
                    ui.add(egui::ProgressBar::new(session.progress()).show_percentage());
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.weak("Meaning:");
                        ui.label(egui::RichText::new(&word.meaning).size(28.0).strong());
                        ui.add_space(20.0);

                        let awaiting = session.feedback() == Feedback::None;
                        let response = ui.add_enabled(
                            awaiting,
                            egui::TextEdit::singleline(&mut self.answer_input)
                                .hint_text("Type the word"),
                        );
                        if awaiting && !response.has_focus() && !response.lost_focus() {
                            response.request_focus();
                        }
                        let entered = response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if awaiting && (entered || ui.button("Check Answer").clicked()) {
                            actions.push(Action::SubmitTyping);
                        }
                    });
                    render_feedback(ui, session.feedback(), self.last_verdict.as_ref());
                }
                SessionMode::MultipleChoice => {
                    ui.add(egui::ProgressBar::new(session.progress()).show_percentage());
                    if let Some(question) = session.question() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.weak(match question.shown {
                                PromptSide::Word => "Word:",
                                PromptSide::Meaning => "Meaning:",
                            });
                            ui.label(egui::RichText::new(&question.prompt).size(28.0).strong());
                            ui.add_space(20.0);

                            let awaiting = session.feedback() == Feedback::None;
                            for (index, option) in question.options.iter().enumerate() {
                                let button = egui::Button::new(option).min_size(egui::vec2(300.0, 32.0));
                                if ui.add_enabled(awaiting, button).clicked() {
                                    actions.push(Action::SubmitChoice(index));
                                }
                            }
                        });
                    }
                    render_feedback(ui, session.feedback(), self.last_verdict.as_ref());
                }
                SessionMode::Retype => {
                    ui.add(egui::ProgressBar::new(session.progress()).show_percentage());
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(egui::RichText::new(&word.word).size(28.0).strong());
                        ui.weak(&word.meaning);
                        ui.add_space(20.0);

                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.answer_input)
                                .hint_text("Retype the word"),
                        );
                        if !response.has_focus() && !response.lost_focus() {
                            response.request_focus();
                        }
                        let entered = response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if entered || ui.button("Check").clicked() {
                            actions.push(Action::SubmitRetype);
                        }

                        ui.add_space(10.0);
                        let done = session.repetitions();
                        let needed = session.required_repetitions();
                        ui.horizontal(|ui| {
                            for i in 0..needed {
                                let colour = if i < done { GREEN } else { egui::Color32::GRAY };
                                ui.colored_label(colour, "✔");
                            }
                        });
                        if session.feedback() == Feedback::Incorrect {
                            ui.colored_label(RED, "Incorrect. Please try again!");
                        }
                    });
                }
            }
        });
    }

    fn render_dialogs(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        if let Some(form) = self.list_form.as_mut() {
            let title = if form.editing.is_some() {
                "Edit List"
            } else {
                "New List"
            };
            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Name:");
                        ui.text_edit_singleline(&mut form.name);
                    });
                    ui.horizontal(|ui| {
                        ui.label("First review date:");
                        ui.add(egui::TextEdit::singleline(&mut form.anchor).hint_text("YYYY-MM-DD"));
                    });
                    if let Some(error) = &form.error {
                        ui.colored_label(RED, error);
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            actions.push(Action::SaveListForm);
                        }
                        if ui.button("Cancel").clicked() {
                            actions.push(Action::CancelListForm);
                        }
                    });
                });
        }

        if let Some(pending) = &self.pending_delete {
            let message = match pending {
                PendingDelete::List(_, name) => format!(
                    "Delete '{name}'? All words within this list will be permanently removed."
                ),
                PendingDelete::Words => {
                    format!("Delete {} selected words?", self.selected.len())
                }
            };
            egui::Window::new("Confirm Delete")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.horizontal(|ui| {
                        if ui.button("Yes, Delete").clicked() {
                            actions.push(Action::ConfirmDelete);
                        }
                        if ui.button("Cancel").clicked() {
                            actions.push(Action::CancelDelete);
                        }
                    });
                });
        }
    }
}

fn render_feedback(ui: &mut egui::Ui, feedback: Feedback, verdict: Option<&Verdict>) {
    ui.add_space(20.0);
    match feedback {
        Feedback::None => {}
        Feedback::Correct => {
            ui.colored_label(GREEN, egui::RichText::new("Correct!").size(20.0).strong());
        }
        Feedback::Incorrect => {
            ui.colored_label(RED, egui::RichText::new("Incorrect!").size(20.0).strong());
            if let Some(verdict) = verdict {
                ui.label(format!("The correct answer was: {}", verdict.expected));
            }
        }
    }
}
