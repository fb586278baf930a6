//! Common test utilities, fixtures, and mocks
//! Builds a dispatch loop wired to fakes so tests can drive it tick by tick.
#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use std::sync::{Arc, Once};
use std::time::Duration;

use serenity::model::id::UserId;
use tokio::sync::Notify;
use tracing::Level;

use zedia::commands::music::utils::command_queue::{Command, Origin};
use zedia::commands::music::utils::dispatch::{DispatchLoop, SessionHandle, Step};
use zedia::commands::music::utils::music_manager::{MusicManager, PlayerSettings, Services};
use zedia::commands::music::utils::session::Session;
use zedia::commands::parser::Verb;

use fixtures::{ALICE, BOB, GUILD, LOUNGE, STUDIO, TEXT_CHANNEL};
use mocks::{FakeTransport, MockResolver, RecordingSurface, StaticRoster, VoiceLog};

static INIT: Once = Once::new();

/// Initialize tracing once for the whole test binary
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

/// A dispatch loop wired to fakes. Alice sits in the lounge, Bob in the studio.
pub struct Harness {
    pub dispatch: DispatchLoop,
    pub handle: SessionHandle,
    pub voice: Arc<VoiceLog>,
    pub surface: Arc<RecordingSurface>,
    pub roster: Arc<StaticRoster>,
    pub wakeup: Arc<Notify>,
}

pub fn harness(resolver: MockResolver) -> Harness {
    init();

    let voice = Arc::new(VoiceLog::default());
    let surface = Arc::new(RecordingSurface::default());
    let roster = Arc::new(StaticRoster::default());
    roster.seat(ALICE, Some(LOUNGE));
    roster.seat(BOB, Some(STUDIO));

    let services = Services {
        resolver: Arc::new(resolver),
        transport: Arc::new(FakeTransport { log: voice.clone() }),
        surface: surface.clone(),
        roster: roster.clone(),
    };
    let manager = MusicManager::new(services, PlayerSettings::default());

    let wakeup = Arc::new(Notify::new());
    let (dispatch, handle) =
        DispatchLoop::new(manager, wakeup.clone(), Duration::from_millis(10));

    Harness {
        dispatch,
        handle,
        voice,
        surface,
        roster,
        wakeup,
    }
}

/// Resolver that resolves every identifier to the fixture track
pub fn resolving_everything() -> MockResolver {
    let mut resolver = MockResolver::new();
    resolver
        .expect_resolve()
        .returning(|identifier| Ok(fixtures::track(identifier)));
    resolver
}

impl Harness {
    pub fn submit(&self, author: UserId, verb: Verb, args: &[&str]) {
        let origin = Origin {
            guild: GUILD,
            channel: TEXT_CHANNEL,
            author,
        };
        let args = args.iter().map(|a| a.to_string()).collect();
        self.handle
            .submit(Command::new(verb, args, origin))
            .unwrap();
    }

    pub async fn tick(&mut self) -> Step {
        self.dispatch.tick().await
    }

    /// Submits one command and runs it
    pub async fn run(&mut self, author: UserId, verb: Verb, args: &[&str]) -> Step {
        self.submit(author, verb, args);
        self.tick().await
    }

    pub fn session(&self) -> &Session {
        self.dispatch.manager().session()
    }
}
