//! Core types for ASZMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod role;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{Discount, DiscountError, Price, PriceError};
pub use product::{Product, ProductImage};
pub use role::Role;
