//! featuredoc — living documentation from Gherkin `.feature` files.
//!
//! The pipeline runs once per build and is strictly one-directional:
//!
//! - [`loader`] scans a directory for `.feature` files and reads them
//! - [`parser`] turns each file into a [`model::FeatureDocument`]
//! - [`view`] derives the listing and detail view-models
//! - [`render`] writes those view-models as HTML, markdown or JSON
//!
//! [`site::build`] drives the whole chain from a [`config::Config`].

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod render;
pub mod site;
pub mod slug;
pub mod view;

pub use error::{Error, ParseError, Result};

/// Tag marking a scenario (or a whole feature) as not implemented yet.
pub const NOT_IMPLEMENTED_TAG: &str = "not-implemented";

/// File extension recognized as a feature file.
pub const FEATURE_EXTENSION: &str = "feature";
