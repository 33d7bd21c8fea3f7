//! Session layer between the engine and a presentation front end.
//!
//! A [`Session`] holds the current snapshot, applies intents one at a time,
//! schedules the AI's turn after a configurable pause and reports what
//! happened through [`SessionEvent`]s. Rendering is left to the caller.

mod config;
mod driver;
mod event;

pub use config::{ConfigError, SessionConfig, ENV_AI_DELAY_MS, ENV_SEED};
pub use driver::{Session, SessionError};
pub use event::SessionEvent;
