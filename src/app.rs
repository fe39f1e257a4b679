use eframe::{egui, App};
use egui::{Color32, Label, Margin, RichText, Sense, Stroke};
use std::sync::Arc;

use crate::config::Config;
use crate::error::TranslateError;
use crate::highlight::{segment_style, BRAND_COLOR};
use crate::orchestrator::ModelClient;
use crate::session::SessionState;
use crate::types::translation::{Language, Segment, SUPPORTED_LANGUAGES};
use crate::worker::{spawn_translation, PendingTranslation};

const SEGMENT_FONT_SIZE: f32 = 16.0;
const ERROR_TEXT: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);
const ERROR_FILL: Color32 = Color32::from_rgb(0x3b, 0x13, 0x13);
const MUTED_TEXT: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);

pub type SharedClient = Arc<dyn ModelClient + Send + Sync>;

pub struct LinguaSyncApp {
    config: Config,
    config_error: Option<String>,
    client: Result<SharedClient, TranslateError>,
    session: SessionState,
    pending: Option<PendingTranslation>,
}

impl LinguaSyncApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        config_error: Option<String>,
        client: Result<SharedClient, TranslateError>,
    ) -> Self {
        Self {
            config,
            config_error,
            client,
            session: SessionState::new(),
            pending: None,
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let Some(job) = self.session.begin_submission() else {
            return;
        };
        match &self.client {
            Ok(client) => {
                let repaint_ctx = ctx.clone();
                self.pending = Some(spawn_translation(
                    Arc::clone(client),
                    job,
                    self.config.temperature,
                    move || repaint_ctx.request_repaint(),
                ));
            }
            Err(e) => {
                log::error!("Translation error: {}", e);
                self.session.finish_submission(job.source, Err(e.clone()));
            }
        }
    }

    fn poll_pending(&mut self) {
        let outcome = match &self.pending {
            Some(pending) => pending.poll(),
            None => return,
        };
        if let Some(outcome) = outcome {
            if let Some(pending) = self.pending.take() {
                self.session.finish_submission(pending.job().source, outcome);
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("LinguaSync").color(BRAND_COLOR).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format!("Powered by {}", self.config.model)).small().color(MUTED_TEXT));
            });
        });
        if let Some(err) = &self.config_error {
            ui.colored_label(ERROR_TEXT, format!("Config: {}", err));
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("TRANSLATE FROM").small().strong().color(MUTED_TEXT));
            let mut new_source: Option<Language> = None;
            egui::ComboBox::from_id_source("source_language")
                .selected_text(self.session.source_language().display_name())
                .width(200.0)
                .show_ui(&mut columns[0], |ui| {
                    for lang in SUPPORTED_LANGUAGES {
                        let selected = lang == self.session.source_language();
                        if ui.selectable_label(selected, lang.display_name()).clicked() && !selected {
                            new_source = Some(lang);
                        }
                    }
                });
            if let Some(lang) = new_source {
                self.session.set_source_language(lang);
            }

            columns[1].label(RichText::new("TRANSLATE TO").small().strong().color(MUTED_TEXT));
            columns[1].horizontal_wrapped(|ui| {
                for lang in self.session.available_targets() {
                    let selected = self.session.is_target_selected(lang);
                    if ui.selectable_label(selected, lang.display_name()).clicked() {
                        self.session.toggle_target(lang);
                    }
                }
            });
        });

        ui.add_space(8.0);
        let mut text = self.session.input_text().to_owned();
        let edit = egui::TextEdit::multiline(&mut text)
            .hint_text("Enter text here to analyze syntax differences...")
            .desired_rows(5)
            .desired_width(f32::INFINITY);
        if ui.add(edit).changed() {
            self.session.set_input_text(text);
        }

        ui.horizontal(|ui| {
            let label = if self.session.is_loading() {
                "Translating..."
            } else {
                "✨ Analyze & Translate"
            };
            let button = egui::Button::new(RichText::new(label).strong());
            if ui.add_enabled(self.session.can_submit(), button).clicked() {
                self.submit(ctx);
            }
        });

        if let Some(err) = self.session.error() {
            ui.add_space(6.0);
            egui::Frame::none()
                .fill(ERROR_FILL)
                .rounding(6.0)
                .inner_margin(Margin::same(10.0))
                .show(ui, |ui| {
                    ui.colored_label(ERROR_TEXT, format!("⚠ {}", err));
                });
        }
    }

    /// Draws the result panels and returns the matchId under the pointer.
    fn show_results(&self, ui: &mut egui::Ui) -> Option<i64> {
        let result = self.session.result()?;
        let hovered = self.session.hovered_match_id();
        let mut pointer_over: Option<i64> = None;

        let source_name = self
            .session
            .result_source()
            .unwrap_or(self.session.source_language());
        panel_heading(ui, &format!("Original Text ({})", source_name), BRAND_COLOR);
        segment_panel(ui, &result.source_segments, hovered, &mut pointer_over);

        for translation in &result.translations {
            ui.add_space(12.0);
            panel_heading(
                ui,
                &format!("{} Translation", translation.language),
                Color32::from_rgb(0x10, 0xb9, 0x81),
            );
            segment_panel(ui, &translation.segments, hovered, &mut pointer_over);
        }

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Hover over any colored word to identify its counterpart in other languages.")
                    .small()
                    .color(MUTED_TEXT),
            );
        });
        pointer_over
    }
}

fn panel_heading(ui: &mut egui::Ui, title: &str, dot: Color32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("●").color(dot));
        ui.label(RichText::new(title.to_uppercase()).small().strong().color(MUTED_TEXT));
    });
}

fn segment_panel(ui: &mut egui::Ui, segments: &[Segment], hovered: Option<i64>, pointer_over: &mut Option<i64>) {
    egui::Frame::group(ui.style())
        .inner_margin(Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(4.0, 8.0);
                for segment in segments {
                    if segment_chip(ui, segment, hovered) && segment.is_linked() {
                        *pointer_over = Some(segment.match_id);
                    }
                }
            });
        });
}

/// Draws one segment. Returns whether the pointer is over it.
fn segment_chip(ui: &mut egui::Ui, segment: &Segment, hovered: Option<i64>) -> bool {
    let style = segment_style(segment.match_id, hovered);
    let text = RichText::new(&segment.text)
        .color(style.text)
        .size(SEGMENT_FONT_SIZE);

    // The stroke is painted inside the frame margin, so its width never moves the layout.
    let inner = egui::Frame::none()
        .fill(style.fill)
        .stroke(Stroke::new(style.border_width, style.border))
        .rounding(4.0)
        .inner_margin(Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| ui.add(Label::new(text).selectable(false).sense(Sense::hover())));

    if let Some(ring) = style.ring {
        ui.painter()
            .rect_stroke(inner.response.rect.expand(2.0), 6.0, Stroke::new(2.0, ring));
    }

    inner.response.hovered() || inner.inner.hovered()
}

impl App for LinguaSyncApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_header(ui);
            ui.add_space(6.0);
        });

        let mut pointer_over = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Frame::group(ui.style())
                        .inner_margin(Margin::same(16.0))
                        .show(ui, |ui| self.show_controls(ui, ctx));

                    ui.add_space(16.0);
                    if self.session.is_loading() {
                        ui.vertical_centered(|ui| ui.add(egui::Spinner::new().size(32.0)));
                    } else {
                        pointer_over = self.show_results(ui);
                    }
                });
        });

        if track_pointer(&mut self.session, pointer_over) {
            ctx.request_repaint();
        }
    }
}

/// Routes this frame's pointer position into the session as enter/leave.
/// Returns true if the hovered concept changed.
fn track_pointer(session: &mut SessionState, pointer_over: Option<i64>) -> bool {
    let before = session.hovered_match_id();
    match pointer_over {
        Some(match_id) => session.hover_enter(match_id),
        None => session.hover_leave(),
    }
    session.hovered_match_id() != before
}
