//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors, plus process-wide tracing setup.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` after the queue is drained
//! 3. **Await completion** - [`InventorySystem::shutdown`] waits for the actor task
//!
//! Requests already queued are answered before the actor exits.

pub mod inventory_system;
pub mod tracing;

pub use inventory_system::*;
pub use self::tracing::setup_tracing;
