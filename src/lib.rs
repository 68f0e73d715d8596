#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Constructor Provider Recipe
//!
//! > **A Recipe for building objects from runtime signatures in Rust.**
//!
//! This crate shows the [`ctor_provider`] crate doing the job it exists for:
//! turning batches of loosely-typed records into strongly-typed model instances,
//! where the record shape is only known at runtime.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Resolve once, construct many times
//! Looking up a constructor by signature is the expensive step. A [`RecordLoader`](records::RecordLoader)
//! does it once per schema and then feeds every row through the same
//! [`Invoker`](ctor_provider::Invoker).
//!
//! ### Exact signatures
//! Columns declare their types. The schema `["user_id", "text", "text"]` is the signature
//! `(UserId, String, String)`, which selects `User::new` and nothing else. A schema with
//! no exact match fails before any row is read.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`ctor_provider`])
//! Type registry, constructor provider, invokers. Knows nothing about the models below.
//!
//! ### 2. The Models ([`model`])
//! Plain data: [`Point`](model::Point), [`User`](model::User), [`Product`](model::Product),
//! [`Order`](model::Order).
//!
//! ### 3. The Catalog ([`catalog`])
//! Registers the model constructors. The one place that says how models can be built.
//!
//! ### 4. The Loader ([`records`])
//! Column schemas, cell conversion, and [`RecordLoader`](records::RecordLoader).
//!
//! ### 5. Runtime ([`runtime`])
//! Tracing setup for the demo binary.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run all tests
//! cargo test --workspace
//! ```

pub mod catalog;
pub mod model;
pub mod records;
pub mod runtime;
