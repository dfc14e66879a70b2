#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EIP-681 payment links for Rust.
//!
//! This crate provides the core pieces for assembling and parsing
//! `ethereum:` payment URLs as defined by EIP-681: a structured
//! [`PaymentIntent`] record, a bidirectional URL codec, and
//! arbitrary-precision unit conversion between human-readable amounts
//! and base units (wei or token decimals).
//!
//! # Overview
//!
//! A payment link carries a recipient (or token contract) address, an
//! optional chain id, an optional contract function name, and a query
//! string of transaction parameters:
//!
//! ```text
//! ethereum:<address>[@<chainId>][/<functionName>][?<key>=<value>&...]
//! ```
//!
//! The codec is pure, synchronous, and total: no input causes a panic.
//! Parse failure is a value ([`None`]), never a fault.
//!
//! # Modules
//!
//! - [`address`] - Hex-address syntax checks and EIP-55 checksum casing
//! - [`cache`] - Injected TTL cache used by the collaborator crates
//! - [`eip681`] - The URL codec: [`encode`], [`decode`], [`validate`]
//! - [`intent`] - The [`PaymentIntent`] record
//! - [`units`] - Ether/wei and token-decimal conversion over `U256`

pub mod address;
pub mod cache;
pub mod eip681;
pub mod intent;
pub mod units;

pub use eip681::{decode, encode, validate};
pub use intent::PaymentIntent;
