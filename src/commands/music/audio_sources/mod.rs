//! This module defines the interface the session uses to turn user input into
//! playable audio, and the `yt-dlp` backed implementation of it.

/// Submodule defining the `TrackMetadata` and `SearchHit` structs returned by resolvers.
pub mod track_metadata;
/// Submodule implementing the `MediaResolver` trait on top of `yt-dlp`.
pub mod youtube;

use serenity::async_trait;
use thiserror::Error;
use url::Url;

pub use track_metadata::{PlayableSource, SearchHit, TrackMetadata};
pub use youtube::YtDlpResolver;

/// Errors raised while searching for or extracting media.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("yt-dlp exited with {status}: {stderr}")]
    Extractor { status: String, stderr: String },

    #[error("Failed to parse media metadata: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No results")]
    NoResults,

    #[error("Not a valid URL: {0}")]
    InvalidIdentifier(String),

    #[error("Media has no streamable format")]
    MissingStream,
}

/// Trait defining the media backend the session resolves queries and URLs against.
/// Implementations may be slow; the caller awaits them to completion.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Runs a ranked search and returns at most `count` hits, best match first.
    /// Fails with `ResolveError::NoResults` when nothing matched.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, ResolveError>;

    /// Resolves an identifier (a media URL) into a playable source plus metadata.
    async fn resolve(&self, identifier: &str) -> Result<TrackMetadata, ResolveError>;
}

/// A utility struct providing general helper functions related to audio sources.
pub struct AudioSource;

impl AudioSource {
    /// Performs a basic check that the input parses as an absolute http(s) URL.
    /// Does not check that anything is reachable behind it.
    pub fn is_url(input: &str) -> bool {
        Url::parse(input)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://www.youtube.com/watch?v=dQw4w9WgXcQ", true ; "youtube watch url")]
    #[test_case("https://youtu.be/dQw4w9WgXcQ", true ; "short link")]
    #[test_case("http://example.com/audio.mp3", true ; "plain http")]
    #[test_case("never gonna give you up", false ; "search words")]
    #[test_case("ftp://example.com/file", false ; "unsupported scheme")]
    #[test_case("", false ; "empty")]
    fn test_is_url(input: &str, expected: bool) {
        assert_eq!(AudioSource::is_url(input), expected);
    }
}
