use thiserror::Error;

/// Failure of the metadata-only title probe.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("yt-dlp not found. Please install yt-dlp and make sure it's in your PATH.")]
    ToolMissing,
    #[error("failed to run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Error retrieving video info: {0}")]
    Extraction(String),
    #[error("Error retrieving video info: unreadable metadata ({0})")]
    Metadata(#[from] serde_json::Error),
    #[error("Video title not found")]
    NoTitle,
}

/// Failure of a download or its post-processing.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No URL provided")]
    EmptyUrl,
    #[error("yt-dlp not found. Please install yt-dlp and make sure it's in your PATH.")]
    ToolMissing,
    #[error("No download folder selected")]
    NoOutputDir,
    #[error("failed to run yt-dlp: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Failed(String),
}
