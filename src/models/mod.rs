//! In-memory models for a single assembly run.
//!
//! # Core Concepts
//!
//! - [`ManifestRef`]: A path to a manifest, tagged with how it entered the run.
//!   The namespace manifest is always first; discovered manifests follow.
//! - [`ManifestText`]: The (possibly injected) text of one manifest.
//! - [`OutputDocument`]: All manifest texts in order, rendered with a
//!   [`SEPARATOR`] between neighbours.
//!
//! Nothing here outlives the run that created it.

mod document;
mod manifest;

pub use document::*;
pub use manifest::*;
