//! # flexoffers-lib-rust
//!
//! A toolkit for the FlexOffers affiliate-marketing API: typed operations
//! over an inconsistent REST/XML upstream, with uniform response
//! envelopes, pre-network parameter validation, and a consent-gated
//! program-application workflow.
//!
//! ## Overview
//!
//! The upstream wire format is only partially typed: collections of one
//! element arrive as bare objects, some endpoints change their top-level
//! tag for single results, and pagination metadata rides as numeric
//! strings. This crate normalizes all of that behind a fixed envelope
//! contract so callers never branch on wire shape or catch exceptions —
//! every operation returns a [`ResponseEnvelope`], success or not.
//!
//! ## Core behavior
//!
//! - **Validation first**: parameters are checked before any outbound
//!   call; a missing credential or absent consent never touches the wire.
//! - **Normalization**: XML payloads decode into uniform sequences with
//!   a derived count and a fixed projected key set.
//! - **Two-stage application**: [`FlexOffersClient::apply_to_program_by_name`]
//!   runs a fuzzy catalog lookup feeding the apply stage;
//!   [`FlexOffersClient::apply_to_program`] enters the apply stage
//!   directly with a known identifier.
//! - **Terminal failures**: transport errors and timeouts classify into
//!   the `error` status; nothing is retried and nothing is cached.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flexoffers_lib_rust::{Consent, FlexOffersClient};
//!
//! #[tokio::main]
//! async fn main() -> flexoffers_lib_rust::Result<()> {
//!     let client = FlexOffersClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let promotions = client
//!         .search_promotions(None, "nike shoe", 1, 10)
//!         .await;
//!     println!("{}", promotions.to_json());
//!
//!     let applied = client
//!         .apply_to_program_by_name(None, "nike", Some("US"), Consent::Accepted)
//!         .await;
//!     println!("{}", applied.to_json());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client construction and the public operations |
//! | [`envelope`] | The uniform response envelope and failure classification |
//! | [`validate`] | Pre-network parameter checks and the consent gate |
//! | [`xml`] | XML decoding and singleton/collection normalization |
//! | [`matcher`] | Fuzzy program-name lookup |
//! | [`transport`] | The outbound HTTP seam and its reqwest implementation |
//! | [`config`] | Environment-driven static configuration |

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod matcher;
pub mod transport;
pub mod validate;
pub mod xml;

// Re-export main types for convenience
pub use client::{FlexOffersClient, FlexOffersClientBuilder};
pub use config::ApiConfig;
pub use envelope::{ResponseEnvelope, Status};
pub use error::Error;
pub use validate::Consent;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
