use tracing::info;

use super::utils::music_manager::{CommandResult, MusicError, MusicManager};
use super::utils::session::Invocation;

/// Search YouTube and play the best match
pub async fn go(manager: &mut MusicManager, inv: &Invocation, args: &[String]) -> CommandResult {
    let query = args.join(" ");
    info!("Go requested by {}: {}", inv.caller, query);

    manager.show_loading(inv).await;
    let hits = manager.search(&query).await?;
    let best = hits
        .into_iter()
        .next()
        .ok_or_else(|| MusicError::SearchFailed(query.clone()))?;

    manager.play(inv, &best.url).await
}
