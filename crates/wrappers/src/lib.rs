//! Per-agent adapters: the `Wrapper` trait, pure argv builders, process
//! spawn/stream/timeout machinery, and the known concrete wrapper set
//! (spec.md §4.1).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod argv;
pub mod error;
pub mod known;
pub mod process;
pub mod wrapper;

pub use error::WrapperError;
pub use known::known_wrappers;
pub use wrapper::{BasicWrapper, HangingVersionWrapper, Wrapper};
