//! Core contracts for hkmeta.
//!
//! This crate contains:
//! - The `MetadataValue` tagged union and its self-describing JSON codec
//! - The `Metadata` keyed collection attached to health-sample records
//! - The bridge to and from untyped framework maps (`AnyValue`)

pub mod domain;
pub mod error;
pub mod payload;

pub use domain::{AnyValue, Metadata, MetadataValue, Timestamp, UntypedMap, ValueType};
pub use error::{CoreError, MetadataError};
pub use payload::Payload;
