use std::collections::HashMap;

const FALLBACK_LANG: &str = "en-US";

const EN_US: &[(&str, &str)] = &[
    ("app-title", "ADL | Video Downloader"),
    ("url-label", "Video URL"),
    ("url-placeholder", "Paste a video or playlist URL"),
    ("options-label", "Options"),
    ("audio-only", "Audio Only"),
    ("quality-default", "Default (1080p)"),
    ("quality-high", "High (1440p)"),
    ("quality-ultra", "4K (2160p)"),
    ("actions-label", "Actions"),
    ("download-button", "Download"),
    ("update-button", "Update yt-dlp"),
    ("download-to", "Download to:"),
    ("browse-button", "Browse..."),
    ("paste-menu", "Paste"),
    ("status-ready", "Ready"),
    ("status-starting", "Starting download..."),
    ("status-downloading", "Downloading..."),
    ("status-finished", "Download finished"),
    ("status-complete", "Download complete"),
    ("status-failed", "Download failed:"),
    ("status-updating", "Updating yt-dlp..."),
    ("status-updated", "yt-dlp updated:"),
    ("playlist-title", "Download Playlist"),
    (
        "playlist-body",
        "You're about to download an entire playlist. This may include a large number of videos. Do you want to continue?",
    ),
];

const ES_ES: &[(&str, &str)] = &[
    ("app-title", "ADL | Descargador de videos"),
    ("url-label", "URL del video"),
    ("url-placeholder", "Pegue la URL de un video o lista"),
    ("options-label", "Opciones"),
    ("audio-only", "Solo audio"),
    ("quality-default", "Normal (1080p)"),
    ("quality-high", "Alta (1440p)"),
    ("actions-label", "Acciones"),
    ("download-button", "Descargar"),
    ("update-button", "Actualizar yt-dlp"),
    ("download-to", "Descargar en:"),
    ("browse-button", "Examinar..."),
    ("paste-menu", "Pegar"),
    ("status-ready", "Listo"),
    ("status-starting", "Iniciando descarga..."),
    ("status-downloading", "Descargando..."),
    ("status-finished", "Descarga terminada"),
    ("status-complete", "Descarga completada"),
    ("status-failed", "La descarga falló:"),
    ("status-updating", "Actualizando yt-dlp..."),
    ("status-updated", "yt-dlp actualizado:"),
    ("playlist-title", "Descargar lista"),
    (
        "playlist-body",
        "Está a punto de descargar una lista completa. Puede incluir muchos videos. ¿Desea continuar?",
    ),
];

/// UI strings per language, with English as the fallback for missing keys.
pub struct Localizations {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    current_lang: &'static str,
}

impl Default for Localizations {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizations {
    pub fn new() -> Self {
        Self::for_locale(std::env::var("LANG").ok().as_deref())
    }

    /// Picks the table matching a POSIX locale such as `es_MX.UTF-8`.
    pub fn for_locale(locale: Option<&str>) -> Self {
        let mut tables = HashMap::new();
        tables.insert("en-US", EN_US.iter().copied().collect());
        tables.insert("es-ES", ES_ES.iter().copied().collect());

        let current_lang = match locale.and_then(|l| l.split(['_', '-', '.']).next()) {
            Some(lang) if lang.eq_ignore_ascii_case("es") => "es-ES",
            _ => FALLBACK_LANG,
        };

        Self {
            tables,
            current_lang,
        }
    }

    pub fn current_lang(&self) -> &str {
        self.current_lang
    }

    /// Looks `key` up in the current language, then English, then echoes the key.
    pub fn get(&self, key: &str) -> String {
        [self.current_lang, FALLBACK_LANG]
            .iter()
            .find_map(|lang| self.tables.get(lang).and_then(|t| t.get(key)))
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
