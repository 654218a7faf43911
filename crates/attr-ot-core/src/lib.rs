//! # attr-ot-core
//!
//! Attribute-map reconciliation algebra for collaboratively edited documents.
//!
//! This crate provides:
//! - A structurally comparable attribute value model with an explicit
//!   deletion marker, distinct from key absence
//! - Deterministic, order-irrelevant attribute maps
//! - The four pure reconciliation operations: [`compose`], [`diff`],
//!   [`invert`], and [`transform`]
//!
//! How attribute maps attach to document positions, how whole-document
//! operations are sequenced, and how edits travel between replicas are all
//! concerns of the surrounding document model, not of this crate. Every
//! operation here is synchronous, stateless, and safe to call from any
//! number of threads at once.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algebra;
pub mod map;
pub mod value;

pub use algebra::{compose, diff, invert, transform};
pub use map::{AttributeMap, ParseError};
pub use value::AttributeValue;
