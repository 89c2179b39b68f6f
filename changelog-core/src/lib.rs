//! Changelog Core - Release segmentation, classification and grouping
//!
//! This crate turns a single Markdown changelog into an ordered release index,
//! independent of how that index is presented:
//! - Token tree built from the Markdown source
//! - Section segmentation by release heading
//! - Library classification and version extraction
//! - Release date resolution against a date index
//! - Fixed library groups with stable anchors
//! - Configuration management

pub mod classify;
pub mod config;
pub mod dates;
pub mod doc;
pub mod error;
pub mod group;
pub mod library;
pub mod pipeline;
pub mod segment;
pub mod slug;
pub mod token;
pub mod version;

// Re-export commonly used types
pub use classify::{ReleaseNote, Thresholds};
pub use config::Config;
pub use dates::{DateIndex, VersionDate};
pub use doc::Changelog;
pub use error::ClassifyError;
pub use group::ReleaseGroup;
pub use library::Library;
pub use pipeline::build_release_groups;
pub use slug::format_id;
pub use token::Token;
