//! Ordered FIFO of parsed commands waiting for the dispatch loop.

use std::collections::VecDeque;

use serenity::model::id::{ChannelId, GuildId, UserId};

use crate::commands::parser::Verb;

/// Where a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub guild: GuildId,
    pub channel: ChannelId,
    pub author: UserId,
}

/// A parsed command, consumed exactly once by the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<String>,
    pub origin: Origin,
}

impl Command {
    pub fn new(verb: Verb, args: Vec<String>, origin: Origin) -> Self {
        Self { verb, args, origin }
    }
}

/// Append-only queue. No priority, deduplication or validation happens here.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command to the tail
    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Remove the head, or `None` when empty
    pub fn dequeue(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origin() -> Origin {
        Origin {
            guild: GuildId::new(1),
            channel: ChannelId::new(2),
            author: UserId::new(3),
        }
    }

    /// Tests that commands are handed out in enqueue order, then empty.
    #[test]
    fn test_enqueue_dequeue_order() {
        let mut queue = CommandQueue::new();
        queue.enqueue(Command::new(Verb::Play, vec!["a".into()], origin()));
        queue.enqueue(Command::new(Verb::Skip, vec![], origin()));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue().map(|c| c.verb), Some(Verb::Play));
        assert_eq!(queue.dequeue().map(|c| c.verb), Some(Verb::Skip));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    /// Tests that duplicate commands are both kept.
    #[test]
    fn test_no_deduplication() {
        let mut queue = CommandQueue::new();
        let command = Command::new(Verb::Help, vec![], origin());
        queue.enqueue(command.clone());
        queue.enqueue(command);

        assert_eq!(queue.len(), 2);
    }
}
