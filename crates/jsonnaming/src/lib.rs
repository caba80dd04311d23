//! Naming policies for streaming JSON serialization.
//!
//! A [`WorkingPolicy`] converts property names (for example `MaxRetries` to
//! `maxRetries`) as they are handed to a [`JsonWrite`] writer. Span-capable
//! policies rewrite the name in scratch memory from the [`arena`], so the
//! common case writes a converted name without allocating a string.
//!
//! ```rust
//! use jsonnaming::{JsonWrite, JsonWriteExt, JsonWriter, NamingConvention, SerializerOptions, WorkingPolicy};
//!
//! let options = SerializerOptions::with_convention(NamingConvention::CamelCase);
//! let policy = WorkingPolicy::new(Some(&options));
//!
//! let mut writer = JsonWriter::new();
//! writer.write_start_object()?;
//! writer.write_property(&policy, "MaxRetries", &3)?;
//! writer.write_property(&policy, "HTTPServer", "edge-1")?;
//! writer.write_end_object()?;
//! assert_eq!(writer.as_str(), r#"{"maxRetries":3,"httpServer":"edge-1"}"#);
//! # Ok::<(), jsonnaming::NamingError>(())
//! ```

#![allow(missing_docs)]

pub mod arena;
pub mod case;

mod error;
mod helpers;
mod number;
mod options;
mod policy;
mod qualified;
mod working;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{EncodingError, FormatError, NamingError};
pub use helpers::{JsonWriteExt, PropertyValue};
pub use number::JsonNumber;
pub use options::SerializerOptions;
pub use policy::{CamelCase, ConvertName, ConvertSpan, Identity, NamingConvention, NamingPolicy};
pub use qualified::{QualifiedName, resolve_default_name};
pub use working::WorkingPolicy;
pub use writer::{JsonWrite, JsonWriter};
