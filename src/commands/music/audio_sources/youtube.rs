//! Implements the `MediaResolver` trait on top of the `yt-dlp` command-line tool.
//! Searches go through `ytsearchN:` and resolution picks the best audio format.

use serenity::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{AudioSource, MediaResolver, ResolveError, SearchHit, TrackMetadata};

/// `yt-dlp` backed resolver. Every call spawns one child process.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    program: String,
}

impl YtDlpResolver {
    /// Creates a resolver invoking `program` (a name on `PATH` or a full path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for a flat search returning one JSON document per hit.
    fn search_args(query: &str, count: usize) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--flat-playlist".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            format!("ytsearch{}:{}", count, query),
        ]
    }

    /// Arguments for extracting a single item with its best audio stream.
    fn resolve_args(identifier: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "-f".to_string(),
            "bestaudio/best".to_string(),
            identifier.to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>) -> Result<String, ResolveError> {
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} failed ({}): {}", self.program, output.status, stderr);
            return Err(ResolveError::Extractor {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, ResolveError> {
        info!("Searching YouTube for: {}", query);

        let stdout = self.run(Self::search_args(query, count.max(1))).await?;
        let mut hits = SearchHit::from_ytdlp_lines(&stdout)?;
        hits.truncate(count);

        if hits.is_empty() {
            return Err(ResolveError::NoResults);
        }
        Ok(hits)
    }

    async fn resolve(&self, identifier: &str) -> Result<TrackMetadata, ResolveError> {
        info!("Resolving audio for: {}", identifier);

        if !AudioSource::is_url(identifier) {
            return Err(ResolveError::InvalidIdentifier(identifier.to_string()));
        }

        let stdout = self.run(Self::resolve_args(identifier)).await?;
        // `--no-playlist` still prints one document per line for some extractors.
        let first = stdout
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or(ResolveError::NoResults)?;

        TrackMetadata::from_ytdlp_json(first)
    }
}
