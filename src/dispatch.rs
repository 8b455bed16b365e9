//! Hand-off from worker threads to the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use log::debug;

use crate::errors::{DownloadError, FetchError};
use crate::models::ProgressEvent;

/// Everything a worker can report back.
#[derive(Debug)]
pub enum UiMessage {
    Title {
        seq: u64,
        result: Result<String, FetchError>,
    },
    Progress(ProgressEvent),
    DownloadDone(Result<(), DownloadError>),
    UpdateDone(Result<String, String>),
}

/// Cloneable sending half given to workers. Each send also wakes the UI so
/// the message is applied on the next frame rather than on the next input.
#[derive(Clone)]
pub struct UiSender {
    tx: Sender<UiMessage>,
    ctx: Option<egui::Context>,
}

impl UiSender {
    pub fn new(tx: Sender<UiMessage>, ctx: Option<egui::Context>) -> Self {
        Self { tx, ctx }
    }

    pub fn send(&self, message: UiMessage) {
        if let Err(e) = self.tx.send(message) {
            // Receiver is gone only when the window has closed.
            debug!("Dropping UI message: {:?}", e.0);
            return;
        }
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }
}

pub fn channel(ctx: Option<egui::Context>) -> (UiSender, Receiver<UiMessage>) {
    let (tx, rx) = mpsc::channel();
    (UiSender::new(tx, ctx), rx)
}
