use std::path::{Path, PathBuf};

use log::{info, warn};

pub const YTDLP_ENV: &str = "ADL_YTDLP";
pub const OUTPUT_DIR_ENV: &str = "ADL_OUTPUT_DIR";

/// Startup settings, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ytdlp: Option<PathBuf>,
    pub output_root: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), || which::which("yt-dlp").ok())
    }

    pub fn from_lookup<V, W>(var: V, find_ytdlp: W) -> anyhow::Result<Self>
    where
        V: Fn(&str) -> Option<String>,
        W: FnOnce() -> Option<PathBuf>,
    {
        let ytdlp = match non_empty(var(YTDLP_ENV)) {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    anyhow::bail!(
                        "{} points at {}, which does not exist",
                        YTDLP_ENV,
                        path.display()
                    );
                }
                Some(path)
            }
            None => find_ytdlp(),
        };
        match &ytdlp {
            Some(path) => info!("Using yt-dlp at {}", path.display()),
            None => warn!("yt-dlp not found; downloads will fail until it is installed"),
        }

        let output_root = match non_empty(var(OUTPUT_DIR_ENV)) {
            Some(dir) => PathBuf::from(dir),
            None => default_output_root()?,
        };

        Ok(Self { ytdlp, output_root })
    }
}

/// Output folder typed in the UI, or `fallback` when the field is blank.
pub fn output_root_or(input: &str, fallback: &Path) -> PathBuf {
    match input.trim() {
        "" => fallback.to_path_buf(),
        dir => PathBuf::from(dir),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_output_root() -> anyhow::Result<PathBuf> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}
