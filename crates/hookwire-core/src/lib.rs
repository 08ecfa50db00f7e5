#![forbid(unsafe_code)]

//! Core types for hookwire.
//!
//! This crate provides:
//! - [`ElementNode`] immutable snapshots of host-rendered markup
//! - [`channel`] the attribute-encoded JSON data channel
//! - [`HookConfig`] attribute names, scroll constants, and policy defaults
//! - [`Location`] / [`Navigator`] for full-reload navigation
//! - [`ParseError`] the single error kind surfaced by decoders

pub mod channel;
pub mod config;
pub mod dom;
pub mod error;
pub mod location;
#[cfg(feature = "tracing-json")]
pub mod logging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::{AttributeNames, BulkConfig, HookConfig, MergePolicy, QueryConfig, SectionConfig};
pub use dom::{ElementNode, Viewport};
pub use error::{ConfigError, ParseError, ParseErrorKind};
pub use location::{Location, Navigator};
