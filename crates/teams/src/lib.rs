//! Teams Driver (spec.md §4.8): filesystem-mediated team config, tasks, and
//! inboxes, plus an optional external coordinator process.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod driver;
pub mod error;
pub mod message;
pub mod presets;
pub mod task;

pub use config::{AgentType, TeamConfig, TeamMember};
pub use driver::{default_base_dir, SpawnTeamOpts, TeamState, TeamsDriver, TeamsEvent};
pub use error::TeamsError;
pub use message::{MessageType, TeamMessage};
pub use presets::TeamPreset;
pub use task::{compute_progress, TaskPartial, TaskStatus, TeamProgress, TeamTask};
