//! Common types for shadeclip.
//!
//! This crate provides the data model shared by all shadeclip crates:
//!
//! - [`ShadingNode`] - A node read from the source scene
//! - [`Value`] - Runtime attribute values
//! - [`Connection`] - Directed edges between node attributes
//! - [`SceneGraph`] - The read-only host scene interface
//! - [`MemoryScene`] - An in-memory scene, loadable from JSON

mod error;
mod node;
mod scene;
mod value;

pub use error::{Error, Result};
pub use node::{Connection, Incoming, ShadingNode};
pub use scene::{MemoryScene, SceneGraph};
pub use value::{KnotValue, RampKnot, Value};
