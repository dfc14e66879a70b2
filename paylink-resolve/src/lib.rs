#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Recipient-name resolution for EIP-681 payment links.
//!
//! Turns a human-entered string (a hex address, an ENS name, or a
//! Basename) into the checksummed address a payment link needs,
//! together with a display name and optional avatar URL. Lookups go
//! through the standard ENS registry/resolver contracts over an alloy
//! provider; Basenames reuse the same contract surface on Base.
//!
//! Resolution is permissive in the same spirit as the link codec:
//! a failed lookup is reported as an invalid [`ResolvedInput`], never
//! a panic.
//!
//! # Modules
//!
//! - [`namehash`] - EIP-137 name hashing
//! - [`resolver`] - Registry/resolver contract reads and input resolution
//! - [`service`] - Known naming services (ENS, Basenames)

pub mod namehash;
pub mod resolver;
pub mod service;

pub use resolver::{NameResolver, ResolveError, ResolvedInput};
pub use service::NameService;
