use std::fmt;

use crate::errors::DownloadError;

/// Resolution cap offered by the three quality buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    #[default]
    Default,
    High,
    Ultra,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::Default, Quality::High, Quality::Ultra];

    pub fn max_height(self) -> u32 {
        match self {
            Quality::Default => 1080,
            Quality::High => 1440,
            Quality::Ultra => 2160,
        }
    }

    /// Localization key for the button label.
    pub fn label_key(self) -> &'static str {
        match self {
            Quality::Default => "quality-default",
            Quality::High => "quality-high",
            Quality::Ultra => "quality-ultra",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Default => write!(f, "Default ({}p)", self.max_height()),
            Quality::High => write!(f, "High ({}p)", self.max_height()),
            Quality::Ultra => write!(f, "4K ({}p)", self.max_height()),
        }
    }
}

/// One download action, built fresh from the UI fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
    audio_only: bool,
    quality: Quality,
}

impl DownloadRequest {
    pub fn new(url: &str, audio_only: bool, quality: Quality) -> Result<Self, DownloadError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DownloadError::EmptyUrl);
        }
        Ok(Self {
            url: url.to_string(),
            audio_only,
            quality,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn audio_only(&self) -> bool {
        self.audio_only
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    Mp3,
}

impl AudioCodec {
    pub fn as_str(self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
        }
    }
}

/// Transcoding applied by the extractor after the streams are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessing {
    ExtractAudio { codec: AudioCodec, bitrate_kbps: u32 },
}

/// What the extractor is asked to fetch and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSpec {
    pub format_selector: String,
    pub output_template: String,
    pub post_processing: Option<PostProcessing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Downloading,
    Finished,
    Errored,
}

/// Normalized progress report handed to the UI sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: Phase,
    pub bytes_done: Option<u64>,
    pub bytes_total: Option<u64>,
    pub percent: Option<u8>,
    pub message: Option<String>,
}

impl ProgressEvent {
    pub fn downloading(bytes_done: Option<u64>, bytes_total: Option<u64>) -> Self {
        let percent = match (bytes_done, bytes_total) {
            (Some(done), Some(total)) => percentage(done, total),
            _ => None,
        };
        Self {
            phase: Phase::Downloading,
            bytes_done,
            bytes_total,
            percent,
            message: None,
        }
    }

    pub fn finished() -> Self {
        Self {
            phase: Phase::Finished,
            bytes_done: None,
            bytes_total: None,
            percent: None,
            message: None,
        }
    }

    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            phase: Phase::Errored,
            bytes_done: None,
            bytes_total: None,
            percent: None,
            message: Some(message.into()),
        }
    }
}

/// `floor(done / total * 100)`, capped at 100. `None` when the total is zero.
pub fn percentage(done: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (u128::from(done) * 100) / u128::from(total);
    Some(pct.min(100) as u8)
}
