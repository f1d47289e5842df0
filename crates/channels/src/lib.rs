//! Platform-neutral half of the relay bot.
//!
//! A chat adapter (Discord) turns each inbound message into an
//! [`InboundMessage`] and hands it to [`RelayListener::handle`], which applies
//! author/channel filtering, bot commands, parsing, and form submission, and
//! returns the reply (if any) to post back.

pub mod command;
pub mod error;
pub mod gating;
pub mod listener;
pub mod replies;
pub mod store;
pub mod target;

pub use {
    command::Command,
    error::{Error, Result},
    listener::{Disposition, IgnoreReason, InboundMessage, ListenerConfig, RelayListener},
    store::{FileTargetChannelStore, TargetChannelStore},
    target::TargetChannel,
};
