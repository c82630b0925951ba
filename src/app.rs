//! Correction form: egui/eframe application.
//!
//! # Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ Digite seu texto (máximo 500 caracteres):     │
//! │ ┌───────────────────────────────────────────┐ │
//! │ │ input                                     │ │
//! │ └───────────────────────────────────────────┘ │
//! │                          Caracteres: 42/500   │
//! │               [ Corrigir Texto ]              │
//! │ Texto Corrigido:                              │
//! │ ┌───────────────────────────────────────────┐ │
//! │ │ output (read-only, red on failure)        │ │
//! │ └───────────────────────────────────────────┘ │
//! │                 ◌ spinner while busy          │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! All request handling lives in [`CorrectionSession`]; this module only
//! draws it and forwards button clicks.

use std::time::Duration;

use eframe::egui;

use crate::config::{AppConfig, Backend};
use crate::correction::ValidationError;
use crate::session::{CorrectionSession, RenderedOutput, SubmitOutcome};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);
const COUNTER_COLOR: egui::Color32 = egui::Color32::from_rgb(140, 140, 140);

// ---------------------------------------------------------------------------
// Small pure helpers
// ---------------------------------------------------------------------------

fn input_label(limit: Option<usize>) -> String {
    match limit {
        Some(limit) => format!("Digite seu texto (máximo {limit} caracteres):"),
        None => "Digite seu texto:".to_string(),
    }
}

fn counter_text(count: usize, limit: usize) -> String {
    format!("Caracteres: {count}/{limit}")
}

fn counter_color(count: usize, limit: usize) -> egui::Color32 {
    if count > limit {
        ERROR_COLOR
    } else {
        COUNTER_COLOR
    }
}

/// Failures are drawn in [`ERROR_COLOR`]; successes keep the theme colour.
fn output_color(output: &RenderedOutput, normal: egui::Color32) -> egui::Color32 {
    if output.is_error {
        ERROR_COLOR
    } else {
        normal
    }
}

// ---------------------------------------------------------------------------
// CorrectorApp
// ---------------------------------------------------------------------------

/// eframe application: the correction form.
pub struct CorrectorApp {
    session: CorrectionSession,
    /// Contents of the input region.
    input: String,
    backend: Backend,
    /// Pending validation warning; shown as a modal until dismissed.
    warning: Option<ValidationError>,
}

impl CorrectorApp {
    pub fn new(session: CorrectionSession, config: &AppConfig) -> Self {
        Self {
            session,
            input: String::new(),
            backend: config.backend,
            warning: None,
        }
    }

    fn start_correction(&mut self) {
        match self.session.submit(&self.input) {
            SubmitOutcome::Started => {
                log::info!("correction requested via {:?} backend", self.backend);
            }
            SubmitOutcome::Rejected(e) => self.warning = Some(e),
            SubmitOutcome::Busy => {}
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_input(&mut self, ui: &mut egui::Ui) {
        let limit = self.session.validator().max_chars();
        ui.label(input_label(limit));

        let enabled = self.session.controls_enabled();
        ui.add_enabled(
            enabled,
            egui::TextEdit::multiline(&mut self.input)
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );

        if let Some(limit) = limit {
            let count = self.input.chars().count();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(counter_text(count, limit))
                        .color(counter_color(count, limit)),
                );
            });
        }

        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_enabled(enabled, egui::Button::new("Corrigir Texto"))
                .clicked()
            {
                self.start_correction();
            }
        });
        ui.add_space(6.0);
    }

    fn draw_output(&self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label("Texto Corrigido:");
            if let Some(output) = self.session.output().filter(|o| !o.is_error) {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Copiar").clicked() {
                        ctx.copy_text(output.text.clone());
                    }
                });
            }
        });

        let (mut shown, color) = match self.session.output() {
            Some(output) => (
                output.text.as_str(),
                output_color(output, ui.visuals().text_color()),
            ),
            None => ("", ui.visuals().text_color()),
        };
        ui.add(
            egui::TextEdit::multiline(&mut shown)
                .desired_rows(8)
                .desired_width(f32::INFINITY)
                .text_color(color),
        );

        if self.session.show_progress() {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new());
            });
        }
    }

    fn draw_warning(&mut self, ctx: &egui::Context) {
        let Some(warning) = self.warning.clone() else {
            return;
        };

        let mut dismissed = false;
        let modal = egui::Modal::new(egui::Id::new("validation_warning")).show(ctx, |ui| {
            ui.heading(warning.title());
            ui.add_space(4.0);
            ui.label(warning.to_string());
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

        if dismissed || modal.should_close() {
            self.warning = None;
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for CorrectorApp {
    /// Called every frame by eframe.  Polls the session, then renders.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.poll() {
            log::debug!("correction finished; controls re-enabled");
        }

        // Keep polling while a request is in flight.
        if self.session.show_progress() {
            ctx.request_repaint_after(Duration::from_millis(66));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                self.draw_input(ui);
                self.draw_output(ui, ctx);
            });

        self.draw_warning(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.session.abort() {
            log::info!("window closed with a correction in flight; task aborted");
        }
        log::info!("corrector window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mentions_limit_only_when_bounded() {
        assert_eq!(
            input_label(Some(500)),
            "Digite seu texto (máximo 500 caracteres):"
        );
        assert_eq!(input_label(None), "Digite seu texto:");
    }

    #[test]
    fn counter_turns_red_past_the_limit() {
        assert_eq!(counter_text(0, 500), "Caracteres: 0/500");
        assert_eq!(counter_color(500, 500), COUNTER_COLOR);
        assert_eq!(counter_color(501, 500), ERROR_COLOR);
    }

    #[test]
    fn only_failures_are_error_coloured() {
        let normal = egui::Color32::WHITE;
        let ok = RenderedOutput {
            text: "Hello world.".into(),
            is_error: false,
        };
        let failed = RenderedOutput {
            text: "Erro: Tempo de conexão esgotado. Verifique sua internet.".into(),
            is_error: true,
        };
        assert_eq!(output_color(&ok, normal), normal);
        assert_eq!(output_color(&failed, normal), ERROR_COLOR);
    }
}
