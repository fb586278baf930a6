//! The dispatch loop: the only task that touches the session.
//!
//! Each iteration either runs the next queued command to completion or, when
//! no command is waiting, lets the manager advance the track queue. Gateway
//! events reach the loop through a `SessionHandle`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serenity::model::id::{ChannelId, GuildId};
use thiserror::Error;
use tokio::sync::Notify;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::chat_surface::Reply;
use super::command_queue::{Command, CommandQueue};
use super::music_manager::{Advancement, MusicError, MusicManager};
use crate::commands::music;
use crate::commands::parser::Verb;

/// Items the gateway hands to the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command(Command),
    /// Someone joined or left a voice channel
    Membership { guild: GuildId, channel: ChannelId },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("The dispatch loop has stopped")]
pub struct SessionClosed;

/// Cloneable sender side of the loop. The loop stops once every handle is
/// dropped and its command queue has drained.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<Inbound>,
}

impl SessionHandle {
    /// Queue a parsed command
    pub fn submit(&self, command: Command) -> Result<(), SessionClosed> {
        self.tx
            .send(Inbound::Command(command))
            .map_err(|_| SessionClosed)
    }

    /// Report that the members of a voice channel changed. The count is read
    /// when the loop applies the notice, not when it is sent.
    pub fn membership_changed(&self, guild: GuildId, channel: ChannelId) -> Result<(), SessionClosed> {
        self.tx
            .send(Inbound::Membership { guild, channel })
            .map_err(|_| SessionClosed)
    }
}

/// What one iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Executed(Verb),
    Advanced(Advancement),
}

pub struct DispatchLoop {
    manager: MusicManager,
    commands: CommandQueue,
    inbox: UnboundedReceiver<Inbound>,
    inbox_closed: bool,
    /// Signalled by the transport when a track finishes
    wakeup: Arc<Notify>,
    /// Fallback re-evaluation period while idle
    interval: Duration,
}

impl DispatchLoop {
    pub fn new(manager: MusicManager, wakeup: Arc<Notify>, interval: Duration) -> (Self, SessionHandle) {
        let (tx, inbox) = mpsc::unbounded_channel();
        let dispatch = Self {
            manager,
            commands: CommandQueue::new(),
            inbox,
            inbox_closed: false,
            wakeup,
            interval,
        };
        (dispatch, SessionHandle { tx })
    }

    pub fn manager(&self) -> &MusicManager {
        &self.manager
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        info!("Dispatch loop started");

        loop {
            self.drain_inbox().await;
            if self.inbox_closed && self.commands.is_empty() {
                break;
            }

            if let Step::Advanced(_) = self.step().await {
                self.wait().await;
            }
        }

        if let Err(err) = self.manager.disconnect().await {
            warn!("Failed to leave voice on shutdown: {}", err);
        }
        info!("Dispatch loop stopped");
    }

    /// Drains the inbox then performs one step.
    pub async fn tick(&mut self) -> Step {
        self.drain_inbox().await;
        self.step().await
    }

    /// Moves everything waiting in the inbox into the command queue.
    /// Membership notices are applied right away, which is still between commands.
    pub async fn drain_inbox(&mut self) {
        loop {
            match self.inbox.try_recv() {
                Ok(item) => self.accept(item).await,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.inbox_closed = true;
                    break;
                }
            }
        }
    }

    /// Runs the next command if there is one, otherwise advances playback.
    pub async fn step(&mut self) -> Step {
        match self.commands.dequeue() {
            Some(command) => {
                let verb = command.verb;
                self.execute(command).await;
                Step::Executed(verb)
            }
            None => {
                let advancement = self.manager.advance().await;
                if advancement != Advancement::Busy && advancement != Advancement::Idle {
                    debug!("Advancement: {:?}", advancement);
                }
                Step::Advanced(advancement)
            }
        }
    }

    async fn accept(&mut self, item: Inbound) {
        match item {
            Inbound::Command(command) => self.commands.enqueue(command),
            Inbound::Membership { guild, channel } => {
                self.manager.on_membership_changed(guild, channel).await;
            }
        }
    }

    async fn execute(&mut self, command: Command) {
        let inv = self.manager.bind(&command.origin).await;
        info!(
            "Running {} {:?} for {} in {}",
            command.verb, command.args, inv.caller, inv.guild
        );

        let outcome = AssertUnwindSafe(music::execute(
            &mut self.manager,
            command.verb,
            &inv,
            &command.args,
        ))
        .catch_unwind()
        .await;

        if outcome.is_err() {
            error!("Handler for {} panicked", command.verb);
            self.manager
                .report(&inv, Reply::Error(MusicError::Unexpected))
                .await;
        }
    }

    /// Sleeps until something may have changed: a new inbound item, a
    /// finished track, or the fallback timer.
    async fn wait(&mut self) {
        let received = tokio::select! {
            biased;
            item = self.inbox.recv(), if !self.inbox_closed => Some(item),
            _ = self.wakeup.notified() => None,
            _ = tokio::time::sleep(self.interval) => None,
        };

        match received {
            Some(Some(item)) => self.accept(item).await,
            Some(None) => self.inbox_closed = true,
            None => {}
        }
    }
}
