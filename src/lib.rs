use std::sync::LazyLock;

pub mod commands;
pub mod config;
pub mod events;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared HTTP client for audio streams
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);
