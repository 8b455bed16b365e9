//! The external extractor seam and its yt-dlp implementation.

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use serde::Deserialize;

use crate::errors::{DownloadError, FetchError};
use crate::models::{DownloadSpec, PostProcessing};

const PROGRESS_PREFIX: &str = "ADL|";
const PROGRESS_TEMPLATE: &str = concat!(
    "download:ADL|%(progress.status)s|%(progress.downloaded_bytes)s|",
    "%(progress.total_bytes)s|%(progress.total_bytes_estimate)s"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    Downloading,
    Finished,
    Other,
}

/// A progress hook record as the extractor reports it, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawProgress {
    pub status: HookStatus,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
}

/// Everything the app needs from the media extraction library.
pub trait Extractor: Send + Sync {
    /// Metadata-only lookup of the title behind `url`.
    fn peek_title(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch `url` according to `spec`, reporting hook records as they arrive.
    fn download(
        &self,
        url: &str,
        spec: &DownloadSpec,
        on_progress: &mut dyn FnMut(RawProgress),
    ) -> Result<(), DownloadError>;

    /// Self-update of the extractor. Returns its report on success.
    fn update(&self) -> anyhow::Result<String>;
}

/// Drives the `yt-dlp` executable. Downloads run with `output_root` as the
/// working directory so the relative templates land beneath it.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: Option<PathBuf>,
    output_root: PathBuf,
}

impl YtDlp {
    pub fn new(program: Option<PathBuf>, output_root: PathBuf) -> Self {
        Self {
            program,
            output_root,
        }
    }
}

impl Extractor for YtDlp {
    fn peek_title(&self, url: &str) -> Result<String, FetchError> {
        let program = self.program.as_ref().ok_or(FetchError::ToolMissing)?;

        let output = Command::new(program)
            .args(probe_args(url))
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<String> = stderr.lines().map(str::to_string).collect();
            let message = failure_message(&lines).unwrap_or_else(|| exit_message(output.status));
            return Err(FetchError::Extraction(message));
        }

        parse_title(&output.stdout)
    }

    fn download(
        &self,
        url: &str,
        spec: &DownloadSpec,
        on_progress: &mut dyn FnMut(RawProgress),
    ) -> Result<(), DownloadError> {
        let program = self.program.as_ref().ok_or(DownloadError::ToolMissing)?;
        if self.output_root.as_os_str().is_empty() {
            return Err(DownloadError::NoOutputDir);
        }
        fs::create_dir_all(&self.output_root)?;

        let mut command = Command::new(program);
        command
            .args(download_args(url, spec))
            .current_dir(&self.output_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!("Command: {:?}", command);

        let mut child = command.spawn()?;

        // Drained on its own thread so a chatty stderr can't stall stdout.
        let stderr_reader = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let mut lines = Vec::new();
                if let Err(e) = for_each_line(stderr, |line| lines.push(line)) {
                    warn!("Reading yt-dlp stderr failed: {}", e);
                }
                lines
            })
        });

        if let Some(stdout) = child.stdout.take() {
            let read = for_each_line(stdout, |line| match parse_progress_line(&line) {
                Some(raw) => on_progress(raw),
                None => debug!("yt-dlp: {}", line),
            });
            if let Err(e) = read {
                warn!("Reading yt-dlp stdout failed: {}", e);
            }
        }

        let status = child.wait()?;
        let stderr_lines = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            let message = failure_message(&stderr_lines).unwrap_or_else(|| exit_message(status));
            warn!("yt-dlp failed ({}): {}", status, message);
            Err(DownloadError::Failed(message))
        }
    }

    fn update(&self) -> anyhow::Result<String> {
        let program = self
            .program
            .as_ref()
            .ok_or_else(|| anyhow!("yt-dlp not found"))?;

        info!("Updating yt-dlp at {}", program.display());
        let output = Command::new(program)
            .arg("-U")
            .stdin(Stdio::null())
            .output()
            .context("Failed to run yt-dlp")?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() {
            let report = stdout
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or_default()
                .trim()
                .to_string();
            Ok(report)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<String> = stderr.lines().map(str::to_string).collect();
            let message = failure_message(&lines).unwrap_or_else(|| exit_message(output.status));
            Err(anyhow!("Failed to update yt-dlp: {}", message))
        }
    }
}

/// Feeds every line of `reader` to `f` until EOF. Lines that aren't valid
/// UTF-8 (titles in a legacy console codepage) are decoded lossily; the pipe
/// must stay drained or yt-dlp dies on its next write.
fn for_each_line<R: Read>(reader: R, mut f: impl FnMut(String)) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return Ok(()),
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                f(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

pub fn probe_args(url: &str) -> Vec<String> {
    [
        "--skip-download",
        "--no-warnings",
        "--no-check-certificate",
        "--flat-playlist",
        "-J",
        "--",
        url,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn download_args(url: &str, spec: &DownloadSpec) -> Vec<String> {
    let mut args: Vec<String> = [
        "--newline",
        "--progress",
        "--no-warnings",
        "--ignore-errors",
        "--progress-template",
        PROGRESS_TEMPLATE,
        "-f",
        spec.format_selector.as_str(),
        "-o",
        spec.output_template.as_str(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if let Some(PostProcessing::ExtractAudio {
        codec,
        bitrate_kbps,
    }) = spec.post_processing
    {
        args.push("-x".to_string());
        args.push("--audio-format".to_string());
        args.push(codec.as_str().to_string());
        args.push("--audio-quality".to_string());
        args.push(format!("{}K", bitrate_kbps));
    }

    // URL last, after `--` so a leading dash can't be read as an option.
    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// Parses one line produced by `PROGRESS_TEMPLATE`. Anything else yields `None`.
pub fn parse_progress_line(line: &str) -> Option<RawProgress> {
    let rest = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    let mut fields = rest.split('|');

    let status = match fields.next()?.trim() {
        "downloading" => HookStatus::Downloading,
        "finished" => HookStatus::Finished,
        _ => HookStatus::Other,
    };
    let downloaded_bytes = parse_bytes(fields.next()?);
    let total_bytes = parse_bytes(fields.next()?);
    let total_bytes_estimate = parse_bytes(fields.next()?);

    Some(RawProgress {
        status,
        downloaded_bytes,
        total_bytes,
        total_bytes_estimate,
    })
}

// yt-dlp prints "NA" for missing fields; estimates may be fractional.
fn parse_bytes(field: &str) -> Option<u64> {
    let value = field.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value as u64)
    } else {
        None
    }
}

#[derive(Deserialize)]
struct ProbeInfo {
    title: Option<String>,
}

pub fn parse_title(json: &[u8]) -> Result<String, FetchError> {
    let info: ProbeInfo = serde_json::from_slice(json)?;
    info.title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .ok_or(FetchError::NoTitle)
}

/// Picks the most useful line out of yt-dlp's stderr.
pub fn failure_message(stderr: &[String]) -> Option<String> {
    stderr
        .iter()
        .rev()
        .find_map(|line| line.trim().strip_prefix("ERROR:").map(|m| m.trim().to_string()))
        .or_else(|| {
            stderr
                .iter()
                .rev()
                .map(|line| line.trim())
                .find(|line| !line.is_empty())
                .map(str::to_string)
        })
}

fn exit_message(status: ExitStatus) -> String {
    format!("yt-dlp exited with {}", status)
}
