//! Defines the track descriptors produced by a `MediaResolver`, and the
//! conversion from `yt-dlp --dump-json` output into them.

use serde::Deserialize;
use std::time::Duration;

use super::ResolveError;

/// Handle to the audio stream of a resolved track, consumed by the voice transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableSource {
    /// Direct URL of the best audio format.
    pub stream_url: String,
}

/// Metadata for a resolved, playable track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    pub duration: Option<Duration>,
    pub uploader: String,
    pub uploader_id: Option<String>,
    pub uploader_url: Option<String>,
    pub source: PlayableSource,
}

/// One entry of a ranked search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    /// Canonical page URL, suitable as a `play`/`queue` identifier.
    pub url: String,
    pub uploader: String,
}

/// Subset of the `yt-dlp` info dict we read. Flat search entries leave most
/// of it empty, so everything is optional.
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    title: Option<String>,
    duration: Option<f64>,
    uploader: Option<String>,
    uploader_id: Option<String>,
    uploader_url: Option<String>,
    channel: Option<String>,
    channel_url: Option<String>,
    webpage_url: Option<String>,
    original_url: Option<String>,
    url: Option<String>,
}

impl YtDlpInfo {
    fn uploader_name(&self) -> String {
        self.uploader
            .clone()
            .or_else(|| self.channel.clone())
            .unwrap_or_else(|| "Unknown uploader".to_string())
    }
}

impl TrackMetadata {
    /// Builds metadata from a single `yt-dlp -j` document.
    pub fn from_ytdlp_json(json: &str) -> Result<Self, ResolveError> {
        let info: YtDlpInfo = serde_json::from_str(json.trim())?;

        let stream_url = info.url.clone().ok_or(ResolveError::MissingStream)?;
        let uploader = info.uploader_name();

        Ok(TrackMetadata {
            title: info.title.unwrap_or_else(|| "Unknown Title".to_string()),
            duration: info
                .duration
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(Duration::from_secs_f64),
            uploader,
            uploader_id: info.uploader_id,
            uploader_url: info.uploader_url.or(info.channel_url),
            source: PlayableSource { stream_url },
        })
    }
}

impl SearchHit {
    /// Parses the JSON-lines output of a `ytsearchN:` query, keeping `yt-dlp`'s ranking.
    /// Entries without a usable URL are skipped.
    pub fn from_ytdlp_lines(output: &str) -> Result<Vec<Self>, ResolveError> {
        let mut hits = Vec::new();

        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            let info: YtDlpInfo = serde_json::from_str(line)?;
            let uploader = info.uploader_name();

            // Flat entries only carry `url`; full ones carry the canonical page URL.
            let Some(url) = info.original_url.or(info.webpage_url).or(info.url) else {
                continue;
            };

            hits.push(SearchHit {
                title: info.title.unwrap_or_else(|| url.clone()),
                url,
                uploader,
            });
        }

        Ok(hits)
    }
}
