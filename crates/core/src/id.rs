//! Newtype string identifiers shared across the workspace.

use std::borrow::Borrow;
use std::fmt;

/// Defines a cheap newtype wrapper around a `String` id, with the small set
/// of conversions every id type in this workspace needs.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            /// Generates a fresh random id.
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Wraps an existing string as an id verbatim.
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First 8 characters, for compact logging.
            pub fn short(&self) -> &str {
                let end = self.0.char_indices().nth(8).map(|(i, _)| i).unwrap_or(self.0.len());
                &self.0[..end]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Stable short key identifying a registered wrapper (e.g. `"claude"`).
    pub struct WrapperId;
}

define_id! {
    /// Identifies the single session orchestrator instance serving a gateway.
    pub struct SessionId;
}

define_id! {
    /// Identifies one chat history entry.
    pub struct MessageId;
}

define_id! {
    /// Identifies a PTY session.
    pub struct PtySessionId;
}

define_id! {
    /// Identifies an RPC session.
    pub struct RpcSessionId;
}

define_id! {
    /// Identifies a thread run.
    pub struct ThreadId;
}

define_id! {
    /// Identifies a team task.
    pub struct TaskId;
}

define_id! {
    /// Identifies a team inbox message.
    pub struct TeamMessageId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
