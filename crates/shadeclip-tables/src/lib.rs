//! Renderer mapping tables for shadeclip.
//!
//! Each renderer has a static list of [`MappingEntry`] records, one per
//! supported source node type. An entry names the destination node type
//! and shading class, and lists an [`AttributePolicy`] for every attribute
//! that needs renaming, a default, a gate or a value transform.
//!
//! Tables are pure data. The translation engine in `shadeclip-engine`
//! interprets them.
//!
//! # Example
//!
//! ```
//! use shadeclip_tables::Renderer;
//!
//! let table = Renderer::Arnold.table();
//! let entry = table.entry("aiStandard").unwrap();
//! assert_eq!(entry.dest_type, "standard");
//! ```

pub mod arnold;
mod error;
pub mod policy;
pub mod prman;
mod renderer;

pub use error::{Error, Result};
pub use policy::{
    AttributePolicy, Expansion, MappingEntry, MaterialRule, StaticValue, Transform, Unlisted, ValueKind,
    FLOAT_TOLERANCE,
};
pub use renderer::{Renderer, RendererTable};
