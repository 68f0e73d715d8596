//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Registration**: every constructor added to the registry (`debug`)
//! - **Resolution**: the constructor picked for a signature (`debug`), or why none was (`warn`)
//! - **Loading**: record loaders becoming ready (`info`) and batch sizes (`debug`)
//!
//! Invocation itself is never logged; it is the hot path.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show registrations and resolutions
//! RUST_LOG=debug cargo run
//!
//! # Only the provider crate
//! RUST_LOG=ctor_provider=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a resolution reads:
//!
//! ```text
//! DEBUG Resolved constructor target_type=User signature=(UserId, String, String) label="User::new"
//! INFO Record loader ready target_type=User signature=(UserId, String, String)
//! ```
//!
//! Log verbosity is the only runtime configuration; there are no config files.

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
