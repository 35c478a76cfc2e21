//! Assembles a directory of deployment manifests into one setup document.
//!
//! The pipeline is linear: [`discovery`] finds every `.yaml` file under the
//! deploy directory, [`inject`] adds a namespace line beneath each
//! `metadata:` key of namespaced manifests, and [`assembler`] joins the
//! results behind the namespace manifest and writes them out in one go.

pub mod assembler;
pub mod config;
pub mod discovery;
pub mod error;
pub mod inject;
pub mod models;

pub use assembler::{AssemblySummary, Assembler};
pub use config::AssemblerConfig;
pub use error::AssembleError;
