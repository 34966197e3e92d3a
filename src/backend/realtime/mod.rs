//! Real-time Module
//!
//! Presence tracking and fan-out for the websocket channels.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs        - Module exports
//! ├── presence.rs   - PresenceRegistry and per-connection queues
//! └── broadcast.rs  - push_to / push_to_many
//! ```
//!
//! Every socket owns an unbounded queue drained by a writer task. The
//! registry stores the sending half under the user's lower-cased email, so
//! any session can reach any other connected user without touching their
//! socket directly.

/// Presence registry
pub mod presence;

/// Fan-out helpers
pub mod broadcast;

pub use broadcast::{push_to, push_to_many};
pub use presence::{ConnectionHandle, Outgoing, PresenceRegistry};
