//! Discord transport: receives guild and DM messages through serenity and
//! hands them to a [`formrelay_channels::RelayListener`].

pub mod bot;
pub mod handler;

pub use {bot::start_bot, handler::DiscordHandler};
