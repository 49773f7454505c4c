//! Generic actor framework for resource management.
//!
//! This module provides the building blocks for type-safe actor systems that manage resource
//! entities with CRUD operations and custom actions. Here it plays the role of the record
//! store: one actor owns one table and serializes every request against it.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the table and its unique-key index
//! - [`ResourceClient`] - Typed, cloneable handle for sending requests to the actor
//! - [`ActorClient`] - Shared `get`/`list`/`delete` for domain clients
//! - [`FrameworkError`] - Common error type
//!
//! # Testing
//!
//! See the [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
