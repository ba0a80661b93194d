//! The URI value and everything that builds or prints it.
//!
//! This module contains:
//! - The immutable [`Uri`] value and component replacement
//! - Parsing of URI strings into components
//! - Serialization back to a canonical string
//! - Query maps with recursive key ordering
//! - Self-reference URIs built from request metadata

pub mod environment;
pub mod parts;
pub mod query;
pub mod value;

mod parser;
mod serializer;

// Re-export main functionality
pub use environment::RequestEnvironment;
pub use parts::{coerce_port, Parts, QueryInput};
pub use query::{QueryMap, QueryValue};
pub use value::Uri;
