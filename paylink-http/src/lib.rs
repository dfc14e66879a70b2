#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP collaborators for EIP-681 payment links.
//!
//! Two thin clients over `reqwest`: token search (to find the contract
//! address and decimals for a token-transfer link) and chain metadata
//! (native currency and RPC endpoints per chain id). Both cache
//! responses with a bounded TTL, and the token client spaces its calls
//! with a minimum interval so interactive callers cannot hammer the
//! upstream API.
//!
//! # Modules
//!
//! - [`chains`] - Chain registry, built-in table, and metadata feed client
//! - [`error`] - Shared HTTP error type
//! - [`throttle`] - Minimum-interval call spacing
//! - [`token`] - Token-search client and [`token::TokenRecord`]

pub mod chains;
pub mod error;
pub mod throttle;
pub mod token;

pub use chains::{ChainFeedClient, ChainMetadata, ChainRegistry};
pub use error::HttpError;
pub use token::{TokenRecord, TokenSearchClient};
