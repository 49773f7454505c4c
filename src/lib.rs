//! # Inventory API
//!
//! An inventory-tracking service: products with a name, description and stock level, plus
//! CRUD and stock adjustment operations over HTTP.
//!
//! ## Design
//!
//! Product state lives in a single [`ResourceActor`](framework::ResourceActor) that processes
//! requests one at a time. A stock change reads, checks and writes the product inside one
//! actor turn, so concurrent decreases can never drive stock below zero and no lock is needed.
//! Failures are typed: every operation returns a
//! [`ProductError`](product_actor::ProductError) whose kind separates validation, not-found,
//! insufficient stock, name conflicts and internal faults.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor, its client and the mock used in tests. It plays the record store:
//! ordered table, unique-key index, all-or-nothing batch inserts.
//!
//! ### 2. The Domain ([`model`], [`product_actor`])
//! [`Product`](model::Product) and its `ActorEntity` implementation, the error taxonomy and
//! the checked [`StockAdjustment`](product_actor::StockAdjustment) arithmetic.
//!
//! ### 3. The Interface ([`clients`])
//! [`ProductClient`](clients::ProductClient): validation, typed results and error
//! classification on top of the generic client.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! Environment configuration, tracing setup, actor startup and graceful shutdown.
//!
//! ### 5. The Transport ([`http`])
//! axum routes under `/products`.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
