//! ASZMart Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront binary and its
//! integration tests:
//! - `storefront` - Server-rendered storefront that fronts the remote store API
//! - `integration-tests` - End-to-end tests against a stub store API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The remote
//! store API owns every record; these types describe what goes over the wire
//! and how the storefront interprets it.
//!
//! # Modules
//!
//! - [`types`] - Emails, roles, product identifiers, prices, discounts and products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
