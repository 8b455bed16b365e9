use std::sync::Arc;
use std::thread;

use log::{debug, error, info};

use crate::dispatch::{UiMessage, UiSender};
use crate::errors::{DownloadError, FetchError};
use crate::models::{DownloadRequest, ProgressEvent};
use crate::options::resolve;
use crate::ytdlp::{Extractor, HookStatus, RawProgress};

/// Runs one download to completion, forwarding normalized progress to `on_event`.
///
/// The extractor is invoked exactly once. A failure is forwarded as an
/// `Errored` event and then returned; nothing is retried or cleaned up.
pub fn download<E, F>(
    extractor: &E,
    request: &DownloadRequest,
    mut on_event: F,
) -> Result<(), DownloadError>
where
    E: Extractor + ?Sized,
    F: FnMut(ProgressEvent),
{
    let spec = resolve(request.quality(), request.audio_only());
    info!(
        "Starting download of {} as {} (format {:?}, template {:?})",
        request.url(),
        if request.audio_only() {
            "audio".to_string()
        } else {
            request.quality().to_string()
        },
        spec.format_selector,
        spec.output_template
    );

    let result = extractor.download(request.url(), &spec, &mut |raw| {
        if let Some(event) = normalize(raw) {
            on_event(event);
        }
    });

    match result {
        Ok(()) => {
            info!("Download of {} complete", request.url());
            Ok(())
        }
        Err(err) => {
            error!("Download of {} failed: {}", request.url(), err);
            on_event(ProgressEvent::errored(err.to_string()));
            Err(err)
        }
    }
}

/// Turns a raw hook record into the event the UI sees.
pub fn normalize(raw: RawProgress) -> Option<ProgressEvent> {
    match raw.status {
        HookStatus::Downloading => {
            let total = raw.total_bytes.or(raw.total_bytes_estimate);
            Some(ProgressEvent::downloading(raw.downloaded_bytes, total))
        }
        HookStatus::Finished => Some(ProgressEvent::finished()),
        HookStatus::Other => {
            debug!("Ignoring hook record {:?}", raw);
            None
        }
    }
}

pub fn peek_title<E: Extractor + ?Sized>(extractor: &E, url: &str) -> Result<String, FetchError> {
    info!("Probing title of {}", url);
    extractor.peek_title(url)
}

pub fn spawn_download(
    extractor: Arc<dyn Extractor>,
    request: DownloadRequest,
    ui: UiSender,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = download(extractor.as_ref(), &request, |event| {
            ui.send(UiMessage::Progress(event))
        });
        ui.send(UiMessage::DownloadDone(result));
    })
}

pub fn spawn_title_probe(
    extractor: Arc<dyn Extractor>,
    seq: u64,
    url: String,
    ui: UiSender,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = peek_title(extractor.as_ref(), &url);
        if let Err(e) = &result {
            debug!("Title probe #{} failed: {}", seq, e);
        }
        ui.send(UiMessage::Title { seq, result });
    })
}

pub fn spawn_update(extractor: Arc<dyn Extractor>, ui: UiSender) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = extractor.update().map_err(|e| {
            error!("{:#}", e);
            format!("{:#}", e)
        });
        ui.send(UiMessage::UpdateDone(result));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch;
    use crate::models::{DownloadSpec, Phase, Quality};
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Scripted stand-in for yt-dlp.
    struct FakeExtractor {
        records: Vec<RawProgress>,
        failure: Option<String>,
        title: Result<String, String>,
        calls: Mutex<Vec<(String, DownloadSpec)>>,
    }

    impl FakeExtractor {
        fn new(records: Vec<RawProgress>) -> Self {
            Self {
                records,
                failure: None,
                title: Ok("A Title".to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Self::new(Vec::new())
            }
        }
    }

    impl Extractor for FakeExtractor {
        fn peek_title(&self, _url: &str) -> Result<String, FetchError> {
            self.title.clone().map_err(FetchError::Extraction)
        }

        fn download(
            &self,
            url: &str,
            spec: &DownloadSpec,
            on_progress: &mut dyn FnMut(RawProgress),
        ) -> Result<(), DownloadError> {
            self.calls.lock().unwrap().push((url.to_string(), spec.clone()));
            for raw in &self.records {
                on_progress(*raw);
            }
            match &self.failure {
                Some(message) => Err(DownloadError::Failed(message.clone())),
                None => Ok(()),
            }
        }

        fn update(&self) -> anyhow::Result<String> {
            match &self.failure {
                Some(message) => Err(anyhow!("{}", message.clone())),
                None => Ok("yt-dlp is up to date".to_string()),
            }
        }
    }

    fn downloading(done: u64, total: Option<u64>, estimate: Option<u64>) -> RawProgress {
        RawProgress {
            status: HookStatus::Downloading,
            downloaded_bytes: Some(done),
            total_bytes: total,
            total_bytes_estimate: estimate,
        }
    }

    fn finished() -> RawProgress {
        RawProgress {
            status: HookStatus::Finished,
            downloaded_bytes: None,
            total_bytes: None,
            total_bytes_estimate: None,
        }
    }

    fn request(audio_only: bool, quality: Quality) -> DownloadRequest {
        DownloadRequest::new("https://example.com/watch?v=1", audio_only, quality).unwrap()
    }

    #[test]
    fn forwards_progress_in_order() {
        let fake = FakeExtractor::new(vec![
            downloading(50, Some(100), None),
            downloading(100, Some(100), None),
            finished(),
        ]);
        let mut seen = Vec::new();
        download(&fake, &request(false, Quality::Default), |ev| seen.push(ev)).unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].percent, Some(50));
        assert_eq!(seen[1].percent, Some(100));
        assert_eq!(seen[2].phase, Phase::Finished);
    }

    #[test]
    fn estimate_used_when_total_missing() {
        let fake = FakeExtractor::new(vec![
            downloading(25, None, Some(200)),
            downloading(30, None, None),
        ]);
        let mut seen = Vec::new();
        download(&fake, &request(false, Quality::Default), |ev| seen.push(ev)).unwrap();

        assert_eq!(seen[0].percent, Some(12));
        assert_eq!(seen[0].bytes_total, Some(200));
        assert_eq!(seen[1].phase, Phase::Downloading);
        assert_eq!(seen[1].percent, None);
    }

    #[test]
    fn downloading_without_byte_counts_has_no_percent() {
        let fake = FakeExtractor::new(vec![
            RawProgress {
                status: HookStatus::Downloading,
                downloaded_bytes: None,
                total_bytes: None,
                total_bytes_estimate: None,
            },
            RawProgress {
                status: HookStatus::Downloading,
                downloaded_bytes: None,
                total_bytes: Some(100),
                total_bytes_estimate: None,
            },
        ]);
        let mut seen = Vec::new();
        download(&fake, &request(false, Quality::Default), |ev| seen.push(ev)).unwrap();

        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|ev| ev.phase == Phase::Downloading));
        assert!(seen.iter().all(|ev| ev.percent.is_none()));
        assert_eq!(seen[0].bytes_done, None);
        assert_eq!(seen[1].bytes_total, Some(100));
    }

    #[test]
    fn other_statuses_are_dropped() {
        let fake = FakeExtractor::new(vec![RawProgress {
            status: HookStatus::Other,
            downloaded_bytes: None,
            total_bytes: None,
            total_bytes_estimate: None,
        }]);
        let mut seen = Vec::new();
        download(&fake, &request(false, Quality::Default), |ev| seen.push(ev)).unwrap();
        assert!(seen.is_empty());
    }

    #[test]
    fn extractor_invoked_once_with_resolved_spec() {
        let fake = FakeExtractor::new(Vec::new());
        download(&fake, &request(true, Quality::High), |_| {}).unwrap();

        let calls = fake.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://example.com/watch?v=1");
        assert_eq!(calls[0].1, resolve(Quality::High, true));
    }

    #[test]
    fn failure_is_forwarded_and_returned() {
        let fake = FakeExtractor::failing("network unreachable");
        let mut seen = Vec::new();
        let err = download(&fake, &request(false, Quality::Ultra), |ev| seen.push(ev))
            .unwrap_err();

        assert_eq!(err.to_string(), "network unreachable");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].phase, Phase::Errored);
        assert_eq!(seen[0].message.as_deref(), Some("network unreachable"));
    }

    #[test]
    fn worker_marshals_events_then_completion() {
        let fake: Arc<dyn Extractor> = Arc::new(FakeExtractor::new(vec![
            downloading(50, Some(100), None),
            finished(),
        ]));
        let (ui, rx) = dispatch::channel(None);
        spawn_download(fake, request(false, Quality::Default), ui)
            .join()
            .unwrap();

        let messages: Vec<UiMessage> = rx.try_iter().collect();
        assert_eq!(messages.len(), 3);
        assert!(matches!(&messages[0], UiMessage::Progress(ev) if ev.percent == Some(50)));
        assert!(matches!(&messages[1], UiMessage::Progress(ev) if ev.phase == Phase::Finished));
        assert!(matches!(&messages[2], UiMessage::DownloadDone(Ok(()))));
    }

    #[test]
    fn probe_worker_tags_result_with_sequence() {
        let fake: Arc<dyn Extractor> = Arc::new(FakeExtractor::new(Vec::new()));
        let (ui, rx) = dispatch::channel(None);
        spawn_title_probe(fake, 7, "https://example.com".to_string(), ui)
            .join()
            .unwrap();

        match rx.try_recv().unwrap() {
            UiMessage::Title { seq, result } => {
                assert_eq!(seq, 7);
                assert_eq!(result.unwrap(), "A Title");
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn update_worker_reports_failure_text() {
        let fake: Arc<dyn Extractor> = Arc::new(FakeExtractor::failing("permission denied"));
        let (ui, rx) = dispatch::channel(None);
        spawn_update(fake, ui).join().unwrap();

        match rx.try_recv().unwrap() {
            UiMessage::UpdateDone(Err(message)) => assert_eq!(message, "permission denied"),
            other => panic!("unexpected message {:?}", other),
        }
    }
}
