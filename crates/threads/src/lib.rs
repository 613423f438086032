//! Thread Engine (spec.md §4.7): compiles thread specs into agent
//! slash-commands, drives them through dedicated RPC sessions, and surfaces
//! per-thread event streams. Includes a fixed preset library.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod engine;
pub mod error;
pub mod presets;
pub mod spec;

pub use engine::{ThreadEngine, ThreadEngineEvent, ThreadEvent, ThreadRun, ThreadStatus};
pub use error::ThreadError;
pub use spec::{quote, ThreadSpec, ThreadStep, ThreadType};
