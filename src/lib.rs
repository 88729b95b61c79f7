//! rada-harvester - Download Ukrainian legislation from zakon.rada.gov.ua.
//!
//! This crate turns the portal's loosely structured HTML into a
//! canonical act record: ordered provisions plus extracted term
//! definitions. Parsing is deterministic — identical input bytes
//! always produce an identical record, which downstream
//! citation-integrity checks rely on.
//!
//! # Example
//!
//! ```
//! use rada_harvester::config;
//!
//! // Validate a portal reference and a date
//! assert!(config::validate_act_ref("2341-14").is_ok());
//! assert!(config::validate_date("2025-01-01").is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, URL builders, validation
//! - [`types`]: Core data types (Act, Provision, Definition, ...)
//! - [`error`]: Error types and Result alias
//! - [`text`]: Entity decoding and text normalization
//! - [`meta`]: Title/date/status resolution
//! - [`chapter`]: Chapter/division heading resolution
//! - [`parser`]: The two segmentation grammars behind one trait
//! - [`definitions`]: Term/definition mining
//! - [`builder`]: Act assembly
//! - [`sources`]: Curated source registry
//! - [`http`]: Portal HTTP client (fetch collaborator)
//! - [`harvester`]: Download-and-parse service
//! - [`yaml`]: YAML output generation
//! - [`cli`]: Command-line interface

pub mod builder;
pub mod chapter;
pub mod cli;
pub mod config;
pub mod definitions;
pub mod error;
pub mod harvester;
pub mod http;
pub mod meta;
pub mod parser;
pub mod sources;
pub mod text;
pub mod types;
pub mod yaml;

// Re-export main functions
pub use builder::{build_act, build_from_registry};
pub use harvester::download_act;

// Re-export commonly used items
pub use config::{validate_act_ref, validate_date};
pub use error::{HarvestError, Result};
pub use sources::SourceRegistry;
pub use types::{Act, ActStatus, Definition, Grammar, Provision, SourceConfig};
