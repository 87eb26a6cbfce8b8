//! Main application UI and state management.
//! Handles category management, card entry, practice/quiz sessions and the
//! drawing surface.

use crate::database::db;
use crate::export::json::{export_json_to_path, import_json};
use crate::models::{CategoryStore, Flashcard, PracticeMode, PracticeSession};
use crate::strokes::{StrokeArtState, StrokeOrderService};
use eframe::egui;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Application screen states
#[derive(Default)]
enum AppScreen {
    #[default]
    Main,
    Practice,
}

/// Main application state
#[derive(Default)]
pub struct HanziApp {
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    store: CategoryStore,
    selected_category: Option<String>,
    english_input: String,
    pinyin_input: String,
    chinese_input: String,
    new_category_name: String,
    conn: Option<Arc<Mutex<Connection>>>,

    current_screen: AppScreen,
    session: Option<PracticeSession>,
    strokes: StrokeOrderService,
    sketchpad: Sketchpad,

    show_export_dialog: bool,
    show_import_result_dialog: bool,
    import_result_message: String,
}

impl eframe::App for HanziApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.strokes.poll();

        match self.current_screen {
            AppScreen::Main => self.render_main_screen(ctx),
            AppScreen::Practice => self.render_practice_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.allowed_to_close {
                // Allow close
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.show_confirmation_dialog = true;
            }
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

        // exporting a category
        if self.show_export_dialog {
            let mut export_name: Option<String> = None;
            let mut should_cancel = false;

            egui::Window::new("Export Category")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Select a category to export:");
                    ui.separator();

                    for name in self.store.list_categories() {
                        let count = self.store.get_cards(name).len();
                        if ui.button(format!("{} ({} cards)", name, count)).clicked() {
                            export_name = Some(name.to_string());
                        }
                    }

                    ui.separator();

                    if ui.button("Cancel").clicked() {
                        should_cancel = true;
                    }
                });

            if let Some(name) = export_name {
                self.handle_export(&name);
            }
            if should_cancel {
                self.show_export_dialog = false;
            }
        }

        if self.show_import_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.import_result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_import_result_dialog = false;
                    }
                });
        }
    }
}

impl HanziApp {
    /// Creates a new application instance with categories loaded from the
    /// database
    pub fn new_with_store(store: CategoryStore, conn: Connection) -> Self {
        let selected_category = store.list_categories().next().map(str::to_string);
        Self {
            store,
            selected_category,
            conn: Some(Arc::new(Mutex::new(conn))),
            ..Default::default()
        }
    }

    /// Writes the whole store back to the database. Failures are logged and
    /// otherwise ignored so a full disk never takes the session down.
    fn persist(&self) {
        if let Some(conn) = &self.conn {
            let conn = conn.lock().unwrap();
            if let Err(e) = db::save_store(&self.store, &conn) {
                eprintln!("Failed to save categories: {e}");
            }
        }
    }

    /// Renders the main screen with category management interface
    fn render_main_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // Import/Export buttons
            ui.horizontal(|ui| {
                if ui.button("Export Category").clicked() {
                    self.show_export_dialog = true;
                }
                if ui.button("Import Category").clicked() {
                    self.handle_import();
                }
            });

            ui.separator();

            // Category creation section
            ui.heading("Create New Category");
            ui.horizontal(|ui| {
                ui.label("Category name:");
                ui.text_edit_singleline(&mut self.new_category_name);
                if ui.button("Create Category").clicked() {
                    if self.store.create_category(&self.new_category_name) {
                        self.persist();
                        self.selected_category = Some(self.new_category_name.clone());
                        self.new_category_name.clear();
                    }
                }
            });

            ui.separator();

            ui.heading(format!("Categories ({})", self.store.category_count()));

            // We store actions to execute after UI rendering to avoid
            // borrowing conflicts
            let mut action_select: Option<String> = None;
            let mut action_practice: Option<String> = None;
            let mut action_quiz: Option<String> = None;

            let names: Vec<String> = self.store.list_categories().map(str::to_string).collect();

            egui::ScrollArea::vertical()
                .id_salt("categories_list")
                .max_height(150.0)
                .show(ui, |ui| {
                    for name in &names {
                        let count = self.store.get_cards(name).len();
                        let is_selected = self.selected_category.as_deref() == Some(name.as_str());

                        ui.horizontal(|ui| {
                            if ui
                                .selectable_label(is_selected, format!("{} ({} cards)", name, count))
                                .clicked()
                            {
                                action_select = Some(name.clone());
                            }

                            // Empty categories have nothing to draw from
                            if ui
                                .add_enabled(count > 0, egui::Button::new("Practice"))
                                .clicked()
                            {
                                action_practice = Some(name.clone());
                            }
                            if ui
                                .add_enabled(count > 0, egui::Button::new("Quiz"))
                                .clicked()
                            {
                                action_quiz = Some(name.clone());
                            }
                        });
                    }
                });

            // Execute deferred actions
            if let Some(name) = action_select {
                self.selected_category = Some(name);
            }
            if let Some(name) = action_practice {
                self.start_session(&name, PracticeMode::Practice, ctx);
            }
            if let Some(name) = action_quiz {
                self.start_session(&name, PracticeMode::Quiz, ctx);
            }

            ui.separator();

            // Flashcard entry for the selected category
            if let Some(category_name) = self.selected_category.clone() {
                ui.heading(format!("Selected Category: {}", category_name));

                ui.horizontal(|ui| {
                    ui.label("English:");
                    ui.text_edit_singleline(&mut self.english_input);
                });

                ui.horizontal(|ui| {
                    ui.label("Pinyin:");
                    ui.text_edit_singleline(&mut self.pinyin_input);
                });

                ui.horizontal(|ui| {
                    ui.label("Chinese:");
                    ui.text_edit_singleline(&mut self.chinese_input);
                });

                if ui.button("Add Flashcard").clicked() {
                    let card = Flashcard::new(
                        &self.english_input,
                        &self.pinyin_input,
                        &self.chinese_input,
                    );
                    match self.store.add_card(&category_name, card) {
                        Ok(()) => {
                            self.persist();
                            self.english_input.clear();
                            self.pinyin_input.clear();
                            self.chinese_input.clear();
                        }
                        Err(e) => eprintln!("Ignoring flashcard: {e}"),
                    }
                }

                ui.separator();

                let cards = self.store.get_cards(&category_name);
                ui.heading(format!("Flashcards ({})", cards.len()));

                egui::ScrollArea::vertical()
                    .id_salt("flashcards_list")
                    .max_height(200.0)
                    .show(ui, |ui| {
                        for (i, card) in cards.iter().enumerate() {
                            ui.group(|ui| {
                                ui.label(format!(
                                    "{}. {} — {} ({})",
                                    i + 1,
                                    card.english,
                                    card.chinese,
                                    card.pinyin
                                ));
                            });
                        }
                    });
            } else {
                ui.label("Select a category to add flashcards");
            }
        });
    }

    /// Renders the practice/quiz screen with the current card, stroke-order
    /// art and the drawing surface
    fn render_practice_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // Store actions to execute after UI rendering
            let mut action_reveal = false;
            let mut action_next = false;
            let mut action_clear_drawing = false;
            let mut action_back = false;

            if let Some(session) = &self.session {
                ui.heading(match session.mode {
                    PracticeMode::Practice => format!("Practice: {}", session.category),
                    PracticeMode::Quiz => format!("Quiz: {}", session.category),
                });

                ui.add_space(10.0);

                ui.group(|ui| {
                    ui.set_min_height(140.0);
                    ui.vertical_centered(|ui| {
                        ui.add_space(10.0);

                        ui.heading(&session.current_card.english);

                        ui.add_space(10.0);

                        if session.show_answer {
                            if !session.current_card.pinyin.is_empty() {
                                ui.label(
                                    egui::RichText::new(&session.current_card.pinyin).italics(),
                                );
                            }
                            ui.label(
                                egui::RichText::new(&session.current_card.chinese).size(64.0),
                            );
                        } else {
                            ui.label("(Click 'Show Answer' to reveal)");
                        }

                        ui.add_space(10.0);
                    });
                });

                if session.show_answer {
                    match self.strokes.state() {
                        StrokeArtState::Loading => {
                            ui.label("Loading stroke order...");
                        }
                        StrokeArtState::Ready(svg) => {
                            ui.add(
                                egui::Image::from_bytes(
                                    self.strokes.art_uri(),
                                    svg.clone().into_bytes(),
                                )
                                .fit_to_exact_size(egui::vec2(180.0, 180.0)),
                            );
                        }
                        StrokeArtState::Missing => {
                            ui.label("No stroke order found.");
                        }
                        StrokeArtState::Idle => {}
                    }
                }

                ui.add_space(10.0);

                if session.mode == PracticeMode::Quiz {
                    ui.horizontal(|ui| {
                        if !session.show_answer && ui.button("Show Answer").clicked() {
                            action_reveal = true;
                        }
                        if ui.button("Next Card").clicked() {
                            action_next = true;
                        }
                    });
                }

                ui.separator();

                ui.label("Draw the character:");
                self.sketchpad.ui(ui);
                ui.horizontal(|ui| {
                    if ui.button("Clear Drawing").clicked() {
                        action_clear_drawing = true;
                    }
                });

                ui.add_space(10.0);

                if ui.button("Back to Main Screen").clicked() {
                    action_back = true;
                }
            }

            // Execute deferred actions
            if action_reveal {
                if let Some(session) = &mut self.session {
                    session.reveal();
                }
            }
            if action_next {
                if let Some(session) = &mut self.session {
                    let cards = self.store.get_cards(&session.category).to_vec();
                    session.next(&cards, &mut rand::rng());
                    self.strokes.request(&session.current_card.chinese, ctx);
                    self.sketchpad.clear();
                }
            }
            if action_clear_drawing {
                self.sketchpad.clear();
            }
            if action_back {
                self.session = None;
                self.strokes.clear();
                self.sketchpad.clear();
                self.current_screen = AppScreen::Main;
            }
        });
    }

    /// Draws a first card and switches to the practice screen. Refused when
    /// the category has no cards.
    fn start_session(&mut self, name: &str, mode: PracticeMode, ctx: &egui::Context) {
        let cards = self.store.get_cards(name).to_vec();
        if let Some(session) = PracticeSession::start(name, &cards, mode, &mut rand::rng()) {
            self.strokes.request(&session.current_card.chinese, ctx);
            self.sketchpad.clear();
            self.session = Some(session);
            self.current_screen = AppScreen::Practice;
        }
    }

    /// Handles category export to JSON file
    fn handle_export(&mut self, name: &str) {
        if let Some(category) = self.store.category(name) {
            // Open file save dialog
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name(format!("{}.json", category.name))
                .add_filter("JSON files", &["json"])
                .save_file()
            {
                match export_json_to_path(&category, path.to_str().unwrap()) {
                    Ok(_) => {
                        self.import_result_message =
                            format!("Category '{}' exported successfully!", category.name);
                        self.show_import_result_dialog = true;
                    }
                    Err(e) => {
                        self.import_result_message = format!("Export failed: {}", e);
                        self.show_import_result_dialog = true;
                    }
                }
            }
        }
        self.show_export_dialog = false;
    }

    /// Handles category import from JSON file
    fn handle_import(&mut self) {
        // Open file selection dialog
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match import_json(path.to_str().unwrap()) {
                Ok(category) => {
                    let name = category.name.clone();
                    let count = category.cards.len();

                    match self.store.insert_category(category) {
                        Ok(()) => {
                            self.persist();
                            self.selected_category = Some(name.clone());
                            self.import_result_message = format!(
                                "Category '{}' imported successfully with {} cards!",
                                name, count
                            );
                        }
                        Err(e) => {
                            self.import_result_message = format!("Import refused: {}", e);
                        }
                    }
                    self.show_import_result_dialog = true;
                }
                Err(e) => {
                    self.import_result_message = format!(
                        "Import failed: {}\n\nPlease check if the file has correct structure:\n{{\n  \"name\": \"Category Name\",\n  \"cards\": [...]\n}}",
                        e
                    );
                    self.show_import_result_dialog = true;
                }
            }
        }
    }
}

/// Freehand drawing surface for copying the current character. Strokes are
/// screen-space polylines; nothing is graded or saved.
#[derive(Default)]
struct Sketchpad {
    strokes: Vec<Vec<egui::Pos2>>,
    active: Vec<egui::Pos2>,
}

impl Sketchpad {
    fn ui(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width().min(280.0), 220.0);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
        let rect = response.rect;

        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(245));
        painter.rect_stroke(rect, 4.0, egui::Stroke::new(1.0, egui::Color32::GRAY));

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                if rect.contains(pos) {
                    self.active.push(pos);
                }
            }
        }
        if response.drag_stopped() && !self.active.is_empty() {
            self.strokes.push(std::mem::take(&mut self.active));
        }

        let pen = egui::Stroke::new(3.0, egui::Color32::BLACK);
        for stroke in self.strokes.iter().chain(std::iter::once(&self.active)) {
            if stroke.len() >= 2 {
                painter.add(egui::Shape::line(stroke.clone(), pen));
            } else if let Some(point) = stroke.first() {
                painter.circle_filled(*point, 1.5, pen.color);
            }
        }
    }

    fn clear(&mut self) {
        self.strokes.clear();
        self.active.clear();
    }
}

/// Tries to load a CJK-capable system font so characters don't render as
/// placeholder boxes. The app still runs without one.
pub fn install_cjk_font(ctx: &egui::Context) {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "C:\\Windows\\Fonts\\msyh.ttc",
    ];

    for path in CANDIDATES {
        if let Ok(bytes) = std::fs::read(path) {
            let mut fonts = egui::FontDefinitions::default();
            fonts
                .font_data
                .insert("cjk".to_string(), egui::FontData::from_owned(bytes));
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                if let Some(list) = fonts.families.get_mut(&family) {
                    list.push("cjk".to_string());
                }
            }
            ctx.set_fonts(fonts);
            return;
        }
    }

    eprintln!("No CJK system font found; characters may render as boxes");
}
