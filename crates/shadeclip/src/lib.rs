//! Shadeclip - copy shading networks into renderer interchange documents.
//!
//! This crate provides a unified interface to the shadeclip crates.
//!
//! # Crates
//!
//! - [`shadeclip_common`] - Scene graph model (nodes, values, connections)
//! - [`shadeclip_tables`] - Per-renderer mapping tables
//! - [`shadeclip_xml`] - Interchange document model, writer and parser
//! - [`shadeclip_engine`] - Graph walker, translator and document builder
//!
//! # Example
//!
//! ```no_run
//! use shadeclip::prelude::*;
//!
//! let scene = MemoryScene::open("scene.json")?;
//! let output = copy_network(&scene, &["woodSG"], &CopyOptions::for_renderer(Renderer::Prman))?;
//!
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! std::fs::write("woodSG.xml", output.to_xml()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use shadeclip_common as common;
pub use shadeclip_engine as engine;
pub use shadeclip_tables as tables;
pub use shadeclip_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use shadeclip_common::{MemoryScene, SceneGraph, ShadingNode, Value};
    #[cfg(feature = "parallel")]
    pub use shadeclip_engine::{copy_batch, CopyJob};
    pub use shadeclip_engine::{copy_network, CopyOptions, CopyOutput, Diagnostic, Severity};
    pub use shadeclip_tables::{Renderer, RendererTable};
    pub use shadeclip_xml::{parse_document, Document};
}

// Re-export commonly used items at the crate root
pub use shadeclip_engine::{copy_network, CopyOptions};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
