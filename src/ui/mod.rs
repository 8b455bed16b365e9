use eframe::egui::{self, Color32, RichText, Stroke};
use log::warn;
use rfd::FileDialog;
use std::path::Path;

use crate::clipboard;
use crate::localizations::Localizations;
use crate::models::Quality;
use crate::session::{Activity, Session, Status, TitleLine};
use crate::theme::*;

fn section<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::group(ui.style())
        .fill(FRAME_BG)
        .stroke(Stroke::new(1.0, BORDER_COLOR))
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(SECONDARY_TEXT));
            add_contents(ui)
        })
        .inner
}

/// URL field plus the title line. Returns true when the text was edited,
/// by typing or through the right-click Paste entry.
pub fn render_url_input(
    ui: &mut egui::Ui,
    session: &mut Session,
    localizer: &Localizations,
) -> bool {
    section(ui, &localizer.get("url-label"), |ui| {
        let mut pasted = false;
        let response = ui.add_enabled(
            !session.is_busy(),
            egui::TextEdit::singleline(&mut session.url)
                .hint_text(localizer.get("url-placeholder"))
                .desired_width(f32::INFINITY)
                .font(egui::FontId::proportional(16.0)),
        );
        let response = response.context_menu(|ui| {
            if ui.button(localizer.get("paste-menu")).clicked() {
                match clipboard::read_text() {
                    Ok(text) => pasted = clipboard::paste_into(&mut session.url, &text),
                    Err(e) => warn!("Clipboard read failed: {:#}", e),
                }
                ui.close_menu();
            }
        });

        match &session.title {
            TitleLine::Empty => {}
            TitleLine::Title(title) => {
                ui.label(RichText::new(title).color(TITLE_TEXT));
            }
            TitleLine::Error(message) => {
                ui.label(RichText::new(message).color(TEXT_ERROR));
            }
        }

        response.changed() || pasted
    })
}

pub fn render_options(ui: &mut egui::Ui, session: &mut Session, localizer: &Localizations) {
    let enabled = !session.is_busy();
    section(ui, &localizer.get("options-label"), |ui| {
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut session.audio_only, localizer.get("audio-only"));
                ui.add_space(20.0);

                // Single selection backed by the enum; quality is moot for audio.
                ui.add_enabled_ui(!session.audio_only, |ui| {
                    for quality in Quality::ALL {
                        let label = RichText::new(localizer.get(quality.label_key()))
                            .color(quality_color(quality));
                        ui.selectable_value(&mut session.quality, quality, label);
                    }
                });
            });
        });
    });
}

pub fn render_download_dir_selector(
    ui: &mut egui::Ui,
    session: &mut Session,
    localizer: &Localizations,
) {
    let enabled = !session.is_busy();
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            ui.label(localizer.get("download-to"));
            ui.add(
                egui::TextEdit::singleline(&mut session.output_dir)
                    .desired_width(ui.available_width() - 110.0),
            );

            if ui.button(localizer.get("browse-button")).clicked() {
                let start = Path::new(&session.output_dir);
                let start = if start.is_dir() { start } else { Path::new(".") };
                if let Some(path) = FileDialog::new().set_directory(start).pick_folder() {
                    session.output_dir = path.to_string_lossy().to_string();
                }
            }
        });
    });
}

/// Buttons return (download clicked, update clicked).
pub fn render_actions(
    ui: &mut egui::Ui,
    session: &Session,
    localizer: &Localizations,
) -> (bool, bool) {
    let enabled = !session.is_busy();
    section(ui, &localizer.get("actions-label"), |ui| {
        let (download, update) = ui
            .horizontal(|ui| {
                let download_button = egui::Button::new(
                    RichText::new(localizer.get("download-button"))
                        .size(BUTTON_FONT_SIZE)
                        .color(BUTTON_MAIN_TEXT),
                )
                .min_size(MIN_SIZE_BUTTON)
                .fill(PRIMARY_BUTTON_BG)
                .rounding(ROUNDING_BUTTON);
                let download = ui.add_enabled(enabled, download_button).clicked();

                let update_button = egui::Button::new(
                    RichText::new(localizer.get("update-button")).size(BUTTON_FONT_SIZE),
                )
                .min_size(MIN_SIZE_BUTTON)
                .rounding(ROUNDING_BUTTON);
                let update = ui.add_enabled(enabled, update_button).clicked();

                (download, update)
            })
            .inner;

        ui.add_space(8.0);
        ui.add(
            egui::ProgressBar::new(session.progress / 100.0)
                .show_percentage()
                .animate(session.activity() == Some(Activity::Updating)),
        );

        let (text, color) = status_text(&session.status, localizer);
        ui.label(RichText::new(text).color(color));

        (download, update)
    })
}

pub fn status_text(status: &Status, localizer: &Localizations) -> (String, Color32) {
    match status {
        Status::Ready => (localizer.get("status-ready"), SECONDARY_TEXT),
        Status::Starting => (localizer.get("status-starting"), SECONDARY_TEXT),
        Status::Downloading(Some(pct)) => (
            format!("{} {}%", localizer.get("status-downloading"), pct),
            SECONDARY_TEXT,
        ),
        Status::Downloading(None) => (localizer.get("status-downloading"), SECONDARY_TEXT),
        Status::Finished => (localizer.get("status-finished"), SECONDARY_TEXT),
        Status::Completed => (localizer.get("status-complete"), TEXT_SUCCESS),
        Status::Failed(message) => (
            format!("{} {}", localizer.get("status-failed"), message),
            TEXT_ERROR,
        ),
        Status::Updating => (localizer.get("status-updating"), SECONDARY_TEXT),
        Status::Updated(report) => (
            format!("{} {}", localizer.get("status-updated"), report),
            TEXT_SUCCESS,
        ),
    }
}
