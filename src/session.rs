//! State owned by the UI thread. Workers never touch it; they send
//! [`UiMessage`]s which are applied here one frame at a time.

use log::{debug, info, warn};

use crate::dispatch::UiMessage;
use crate::models::{DownloadRequest, Phase, Quality};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Downloading,
    Updating,
}

/// What the status line should say. Rendered through the localizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Starting,
    Downloading(Option<u8>),
    Finished,
    Completed,
    Failed(String),
    Updating,
    Updated(String),
}

/// What the line under the URL field shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleLine {
    Empty,
    Title(String),
    Error(String),
}

#[derive(Debug)]
pub struct Session {
    pub url: String,
    pub audio_only: bool,
    pub quality: Quality,
    pub output_dir: String,
    pub progress: f32,
    pub status: Status,
    pub title: TitleLine,
    busy: Option<Activity>,
    probe_seq: u64,
}

impl Session {
    pub fn new(output_dir: String) -> Self {
        Self {
            url: String::new(),
            audio_only: false,
            quality: Quality::default(),
            output_dir,
            progress: 0.0,
            status: Status::Ready,
            title: TitleLine::Empty,
            busy: None,
            probe_seq: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub fn activity(&self) -> Option<Activity> {
        self.busy
    }

    /// Called after every edit of the URL field. Returns the probe to run,
    /// if any; results tagged with an older sequence number are discarded.
    pub fn url_changed(&mut self) -> Option<(u64, String)> {
        self.probe_seq += 1;
        let url = self.url.trim();
        if url.is_empty() {
            self.title = TitleLine::Empty;
            return None;
        }
        Some((self.probe_seq, url.to_string()))
    }

    /// Marks the session busy and returns the request to run, or `None` when
    /// a download can't start right now.
    pub fn begin_download(&mut self) -> Option<DownloadRequest> {
        if self.is_busy() {
            return None;
        }
        let request = match DownloadRequest::new(&self.url, self.audio_only, self.quality) {
            Ok(request) => request,
            Err(e) => {
                self.status = Status::Failed(e.to_string());
                return None;
            }
        };
        self.busy = Some(Activity::Downloading);
        self.progress = 0.0;
        self.status = Status::Starting;
        Some(request)
    }

    pub fn begin_update(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.busy = Some(Activity::Updating);
        self.progress = 0.0;
        self.status = Status::Updating;
        true
    }

    pub fn apply(&mut self, message: UiMessage) {
        match message {
            UiMessage::Title { seq, result } => {
                if seq != self.probe_seq {
                    debug!("Dropping stale title probe #{} (latest #{})", seq, self.probe_seq);
                    return;
                }
                self.title = match result {
                    Ok(title) => TitleLine::Title(title),
                    Err(e) => TitleLine::Error(e.to_string()),
                };
            }
            UiMessage::Progress(event) => match event.phase {
                Phase::Downloading => {
                    if let Some(pct) = event.percent {
                        self.progress = f32::from(pct);
                    }
                    self.status = Status::Downloading(event.percent);
                }
                Phase::Finished => self.status = Status::Finished,
                Phase::Errored => {
                    self.status = Status::Failed(event.message.unwrap_or_default());
                }
            },
            UiMessage::DownloadDone(result) => {
                self.busy = None;
                match result {
                    Ok(()) => {
                        info!("Download finished");
                        self.progress = 100.0;
                        self.status = Status::Completed;
                        self.url.clear();
                        self.url_changed();
                    }
                    Err(e) => {
                        warn!("Download failed: {}", e);
                        self.status = Status::Failed(e.to_string());
                    }
                }
            }
            UiMessage::UpdateDone(result) => {
                self.busy = None;
                self.status = match result {
                    Ok(report) => Status::Updated(report),
                    Err(message) => Status::Failed(message),
                };
            }
        }
    }
}
