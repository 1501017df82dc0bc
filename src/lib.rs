//! Chord-style DHT routing and membership core.
//!
//! This crate implements the ring topology, finger-table maintenance,
//! node-join protocol and key routing of a Chord-style distributed hash
//! table over a fixed identifier space. All nodes live in one logical
//! address space: a [`Ring`] owns every slot and cross-node calls are
//! plain method calls on slot indices, so there is no transport, no
//! serialization surface and no failure detection.
//!
//! # Example
//!
//! ```rust
//! use chordal::{Ring, RingConfig};
//!
//! fn main() -> chordal::Result<()> {
//!     // a ring of 2^3 = 8 identifiers
//!     let mut ring = Ring::new(RingConfig::new(3))?;
//!
//!     // bootstrap the first member, then join through it
//!     ring.join(0, None)?;
//!     ring.join(4, Some(0))?;
//!     ring.join(2, Some(0))?;
//!
//!     // key 3 falls in (2, 4], so node 4 owns it
//!     let owner = ring.put(0, 3, "value")?;
//!     assert_eq!(owner, 4);
//!
//!     // any member resolves the same owner
//!     assert_eq!(ring.get(2, 3)?.as_deref(), Some(&b"value"[..]));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Driving caller / renderer            │
//! │  join · find_successor · put/get/del        │
//! │  node views · finger-table dumps            │
//! └─────────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────────┐
//! │                   Ring                      │
//! │  owns all 2^m node slots, by identifier     │
//! └─────────────────────────────────────────────┘
//!          │               │              │
//!          ▼               ▼              ▼
//!    ┌──────────┐    ┌──────────┐   ┌──────────┐
//!    │   Join   │    │ Routing  │   │ KV store │
//!    │ protocol │    │  engine  │   │          │
//!    └──────────┘    └──────────┘   └──────────┘
//!          └───────────────┴──────────────┘
//!                          │
//!                          ▼
//!              ┌──────────────────────┐
//!              │  interval arithmetic │
//!              └──────────────────────┘
//! ```
//!
//! # Consistency model
//!
//! Everything is synchronous and single-threaded: an operation runs to
//! completion before returning. Joins must be serialized against a ring —
//! the aggressive join-time maintenance here has no stabilization pass to
//! repair interleaved joins. Lookups are bounded by a hop cap equal to the
//! ring size and report a fatal routing error rather than returning a
//! wrong owner.

pub mod config;
pub mod error;
pub mod interval;
mod join;
mod node;
pub mod ring;
mod routing;
mod store;
pub mod testing;
pub mod types;

// Re-export main types for convenience
pub use config::{RingConfig, MAX_M_BITS};
pub use error::{Error, JoinError, Result, RoutingError};
pub use ring::Ring;
pub use types::{FingerRow, NodeId, NodeView, RingStats};
