//! Maps the user's quality/audio choice to what yt-dlp is asked to do.

use crate::models::{AudioCodec, DownloadSpec, PostProcessing, Quality};

pub const AUDIO_DIR: &str = "audio";
pub const VIDEO_DIR: &str = "videos";
pub const AUDIO_BITRATE_KBPS: u32 = 320;

const AUDIO_SELECTOR: &str = "bestaudio/best";

pub fn resolve(quality: Quality, audio_only: bool) -> DownloadSpec {
    if audio_only {
        return DownloadSpec {
            format_selector: AUDIO_SELECTOR.to_string(),
            output_template: output_template(AUDIO_DIR),
            post_processing: Some(PostProcessing::ExtractAudio {
                codec: AudioCodec::Mp3,
                bitrate_kbps: AUDIO_BITRATE_KBPS,
            }),
        };
    }

    let cap = quality.max_height();
    DownloadSpec {
        format_selector: format!("bestvideo[height<={cap}]+bestaudio/best[height<={cap}]"),
        output_template: output_template(VIDEO_DIR),
        post_processing: None,
    }
}

fn output_template(dir: &str) -> String {
    format!("{dir}/%(title)s.%(ext)s")
}

/// Whether the URL should trigger the playlist confirmation prompt.
pub fn looks_like_playlist(url: &str) -> bool {
    url.contains("playlist")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_selectors_carry_height_cap() {
        assert_eq!(
            resolve(Quality::Default, false).format_selector,
            "bestvideo[height<=1080]+bestaudio/best[height<=1080]"
        );
        assert_eq!(
            resolve(Quality::High, false).format_selector,
            "bestvideo[height<=1440]+bestaudio/best[height<=1440]"
        );
        assert_eq!(
            resolve(Quality::Ultra, false).format_selector,
            "bestvideo[height<=2160]+bestaudio/best[height<=2160]"
        );
    }

    #[test]
    fn high_quality_video_goes_to_videos_dir() {
        let spec = resolve(Quality::High, false);
        assert!(spec.output_template.starts_with("videos/"));
        assert_eq!(spec.output_template, "videos/%(title)s.%(ext)s");
        assert!(spec.format_selector.contains("height<=1440"));
        assert_eq!(spec.post_processing, None);
    }

    #[test]
    fn audio_only_ignores_quality() {
        for quality in Quality::ALL {
            let spec = resolve(quality, true);
            assert_eq!(spec.format_selector, "bestaudio/best");
            assert!(spec.output_template.starts_with("audio/"));
            assert_eq!(
                spec.post_processing,
                Some(PostProcessing::ExtractAudio {
                    codec: AudioCodec::Mp3,
                    bitrate_kbps: 320,
                })
            );
        }
    }

    #[test]
    fn resolve_is_deterministic() {
        for quality in Quality::ALL {
            for audio_only in [true, false] {
                assert_eq!(resolve(quality, audio_only), resolve(quality, audio_only));
            }
        }
    }

    #[test]
    fn playlist_detection() {
        assert!(looks_like_playlist(
            "https://www.youtube.com/playlist?list=PL123"
        ));
        assert!(!looks_like_playlist("https://www.youtube.com/watch?v=abc"));
    }
}
