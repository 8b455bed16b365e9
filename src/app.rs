use eframe::egui;
use log::info;
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use crate::config::{output_root_or, AppConfig};
use crate::dispatch::{self, UiMessage, UiSender};
use crate::download::{spawn_download, spawn_title_probe, spawn_update};
use crate::localizations::Localizations;
use crate::options::looks_like_playlist;
use crate::session::Session;
use crate::ui;
use crate::ytdlp::{Extractor, YtDlp};

pub struct AdlApp {
    session: Session,
    localizer: Localizations,
    ytdlp_bin: Option<PathBuf>,
    default_output_root: PathBuf,
    ui_sender: UiSender,
    ui_receiver: Receiver<UiMessage>,
}

impl AdlApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (ui_sender, ui_receiver) = dispatch::channel(Some(ctx.clone()));
        let output_dir = config.output_root.to_string_lossy().to_string();
        let localizer = Localizations::new();
        info!("UI language: {}", localizer.current_lang());

        Self {
            session: Session::new(output_dir),
            localizer,
            ytdlp_bin: config.ytdlp,
            default_output_root: config.output_root,
            ui_sender,
            ui_receiver,
        }
    }

    // Built per action so the current output folder is picked up.
    // A cleared folder field falls back to the startup default.
    fn extractor(&self) -> Arc<dyn Extractor> {
        Arc::new(YtDlp::new(
            self.ytdlp_bin.clone(),
            output_root_or(&self.session.output_dir, &self.default_output_root),
        ))
    }

    fn process_messages(&mut self) {
        while let Ok(message) = self.ui_receiver.try_recv() {
            self.session.apply(message);
        }
    }

    fn on_url_changed(&mut self) {
        if let Some((seq, url)) = self.session.url_changed() {
            spawn_title_probe(self.extractor(), seq, url, self.ui_sender.clone());
        }
    }

    fn start_download(&mut self) {
        if self.session.is_busy() {
            return;
        }
        if looks_like_playlist(&self.session.url) && !self.confirm_playlist_download() {
            info!("Playlist download declined");
            return;
        }
        if let Some(request) = self.session.begin_download() {
            spawn_download(self.extractor(), request, self.ui_sender.clone());
        }
    }

    fn confirm_playlist_download(&self) -> bool {
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(&self.localizer.get("playlist-title"))
            .set_description(&self.localizer.get("playlist-body"))
            .set_buttons(MessageButtons::YesNo)
            .show()
    }

    fn start_update(&mut self) {
        if self.session.begin_update() {
            spawn_update(self.extractor(), self.ui_sender.clone());
        }
    }
}

impl eframe::App for AdlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        let mut url_changed = false;
        let mut download_clicked = false;
        let mut update_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.localizer.get("app-title"));
            ui.add_space(10.0);

            url_changed = ui::render_url_input(ui, &mut self.session, &self.localizer);
            ui.add_space(6.0);
            ui::render_options(ui, &mut self.session, &self.localizer);
            ui.add_space(6.0);
            ui::render_download_dir_selector(ui, &mut self.session, &self.localizer);
            ui.add_space(6.0);
            (download_clicked, update_clicked) =
                ui::render_actions(ui, &self.session, &self.localizer);
        });

        if url_changed {
            self.on_url_changed();
        }
        if download_clicked {
            self.start_download();
        }
        if update_clicked {
            self.start_update();
        }
    }
}
