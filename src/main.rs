use std::sync::Arc;

use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use tokio::sync::Notify;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zedia::Error;
use zedia::commands::music::audio_sources::YtDlpResolver;
use zedia::commands::music::utils::discord::DiscordGateway;
use zedia::commands::music::utils::dispatch::DispatchLoop;
use zedia::commands::music::utils::embedded_messages::Addressing;
use zedia::commands::music::utils::music_manager::{MusicManager, PlayerSettings, Services};
use zedia::commands::music::utils::songbird_voice::SongbirdTransport;
use zedia::commands::music::utils::voice::TransportError;
use zedia::commands::parser::CommandParser;
use zedia::config::Config;
use zedia::events::{Data, event_handler};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("zedia=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let setup_config = config.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                info!("Connected as {}", ready.user.name);

                let parser = CommandParser::new(ready.user.id, setup_config.prefix.clone());
                let addressing = Addressing {
                    mention: parser.mention(),
                    prefix: parser.prefix().to_string(),
                };
                let gateway = Arc::new(DiscordGateway::from_context(ctx, addressing));

                let songbird = songbird::get(ctx)
                    .await
                    .ok_or(TransportError::NoVoiceManager)?;
                let finished = Arc::new(Notify::new());

                let services = Services {
                    resolver: Arc::new(YtDlpResolver::new(setup_config.ytdlp_path.clone())),
                    transport: Arc::new(SongbirdTransport::new(songbird, finished.clone())),
                    surface: gateway.clone(),
                    roster: gateway.clone(),
                };
                let manager = MusicManager::new(
                    services,
                    PlayerSettings {
                        search_results: setup_config.search_results,
                    },
                );

                let (dispatch, session) =
                    DispatchLoop::new(manager, finished, setup_config.advance_interval);
                dispatch.spawn();

                Ok(Data {
                    session,
                    parser,
                    gateway,
                    guild_filter: setup_config.guild,
                })
            })
        })
        .build();

    let mut client = ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .register_songbird()
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.map_err(Into::into)
}
