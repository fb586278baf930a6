//! Turns raw message text into a verb plus arguments.
//!
//! Two syntaxes are accepted: the verbose `<@bot> verb args...` form and the
//! concise `<prefix><letter> args...` form (`!zp <url>` by default).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serenity::model::id::UserId;

use crate::commands::music::utils::music_manager::MusicError;

/// Matches a user mention, with or without the legacy nickname marker.
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d+)>$").unwrap());

/// Every command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Help,
    Search,
    Go,
    Play,
    Exit,
    Reload,
    Queue,
    Skip,
    ListQueue,
    ClearQueue,
}

/// How many arguments a verb takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn check(self, args: &[String]) -> Result<(), MusicError> {
        let ok = match self {
            Arity::Exactly(n) => args.len() == n,
            Arity::AtLeast(n) => args.len() >= n,
        };
        if ok { Ok(()) } else { Err(MusicError::ArgumentCount) }
    }
}

impl Verb {
    /// All verbs, in the order help lists them.
    pub const ALL: [Verb; 10] = [
        Verb::Help,
        Verb::Search,
        Verb::Go,
        Verb::Play,
        Verb::Exit,
        Verb::Reload,
        Verb::Queue,
        Verb::Skip,
        Verb::ListQueue,
        Verb::ClearQueue,
    ];

    /// Name used in the verbose syntax.
    pub fn name(self) -> &'static str {
        match self {
            Verb::Help => "help",
            Verb::Search => "search",
            Verb::Go => "go",
            Verb::Play => "play",
            Verb::Exit => "exit",
            Verb::Reload => "reload",
            Verb::Queue => "queue",
            Verb::Skip => "skip",
            Verb::ListQueue => "list-queue",
            Verb::ClearQueue => "clear-queue",
        }
    }

    /// Letter used in the concise syntax.
    pub fn letter(self) -> char {
        match self {
            Verb::Help => 'h',
            Verb::Search => 'f',
            Verb::Go => 'g',
            Verb::Play => 'p',
            Verb::Exit => 'x',
            Verb::Reload => 'r',
            Verb::Queue => 'q',
            Verb::Skip => 's',
            Verb::ListQueue => 'l',
            Verb::ClearQueue => 'c',
        }
    }

    pub fn from_name(name: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.name() == name)
    }

    pub fn from_letter(letter: char) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.letter() == letter)
    }

    pub fn arity(self) -> Arity {
        match self {
            Verb::Search | Verb::Go => Arity::AtLeast(1),
            Verb::Play | Verb::Queue => Arity::Exactly(1),
            _ => Arity::Exactly(0),
        }
    }

    /// One-line description shown in help.
    pub fn summary(self) -> &'static str {
        match self {
            Verb::Help => "Show commands",
            Verb::Search => "Search YouTube",
            Verb::Go => "Play audio from YouTube search",
            Verb::Play => "Play audio from a YouTube URL",
            Verb::Exit => "Stop bot",
            Verb::Reload => "Reload the current audio",
            Verb::Queue => "Add audio to the queue from a YouTube URL",
            Verb::Skip => "Skip to the next URL in the queue",
            Verb::ListQueue => "List all URLs in the queue",
            Verb::ClearQueue => "Clear all URLs from the queue",
        }
    }

    /// Placeholder for the verb's argument, if it takes one.
    pub fn argument_hint(self) -> Option<&'static str> {
        match self {
            Verb::Search | Verb::Go => Some("{*query*}"),
            Verb::Play | Verb::Queue => Some("{*url*}"),
            _ => None,
        }
    }

    /// Both syntaxes for this verb, one per line.
    pub fn usage(self, mention: &str, prefix: &str) -> String {
        let suffix = self
            .argument_hint()
            .map(|hint| format!(" {}", hint))
            .unwrap_or_default();
        format!(
            "- {} {}{}\n- {}{}{}",
            mention,
            self.name(),
            suffix,
            prefix,
            self.letter(),
            suffix
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A message that was addressed to the bot and named a known verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub verb: Verb,
    pub args: Vec<String>,
}

/// Recognizes messages addressed to one bot account.
#[derive(Debug, Clone)]
pub struct CommandParser {
    bot_id: UserId,
    prefix: String,
}

impl CommandParser {
    pub fn new(bot_id: UserId, prefix: impl Into<String>) -> Self {
        Self {
            bot_id,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Mention string for the bot, as used in help texts.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.bot_id)
    }

    fn is_bot_mention(&self, token: &str) -> bool {
        MENTION_REGEX
            .captures(token)
            .and_then(|caps| caps.get(1))
            .and_then(|id| id.as_str().parse::<u64>().ok())
            .is_some_and(|id| id == self.bot_id.get())
    }

    /// Parses a message.
    ///
    /// Returns `None` when the message is not addressed to the bot,
    /// `Some(Err(UnrecognizedCommand))` when it is but names no known verb.
    /// Argument counts are not checked here.
    pub fn parse(&self, content: &str) -> Option<Result<ParsedCommand, MusicError>> {
        let mut tokens = content.split_whitespace();
        let head = tokens.next()?;

        if self.is_bot_mention(head) {
            let verb = tokens.next().and_then(Verb::from_name);
            return Some(
                verb.map(|verb| ParsedCommand {
                    verb,
                    args: tokens.map(str::to_string).collect(),
                })
                .ok_or(MusicError::UnrecognizedCommand),
            );
        }

        let rest = head.strip_prefix(self.prefix.as_str())?;
        let mut letters = rest.chars();
        let verb = match (letters.next(), letters.next()) {
            (Some(letter), None) => Verb::from_letter(letter),
            _ => None,
        };

        Some(
            verb.map(|verb| ParsedCommand {
                verb,
                args: tokens.map(str::to_string).collect(),
            })
            .ok_or(MusicError::UnrecognizedCommand),
        )
    }
}
