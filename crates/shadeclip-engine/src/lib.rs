//! Shading network copy engine for shadeclip.
//!
//! This crate turns a selection in a source scene into an interchange
//! document:
//!
//! - [`walker`] - Discovers the network upstream of the selected roots
//! - [`expand`] - Rewrites constructs the renderer has no single node for
//! - [`translate`] - Maps each node and its attributes through a renderer table
//! - [`format`] - Formats values with the renderer's fixed precision
//! - [`layout`] - Places nodes for the destination editor
//! - [`builder`] - Assembles a closed [`Document`](shadeclip_xml::Document)
//!
//! [`copy_network`] runs the whole pipeline.
//!
//! # Example
//!
//! ```
//! use shadeclip_common::{MemoryScene, ShadingNode};
//! use shadeclip_engine::{copy_network, CopyOptions};
//!
//! let scene = MemoryScene::from_nodes([
//!     ShadingNode::new("SG1", "shadingEngine").input("surfaceShader", "std1", "outColor"),
//!     ShadingNode::new("std1", "aiStandard").attr("Kd", 0.5),
//! ])?;
//!
//! let output = copy_network(&scene, &["SG1"], &CopyOptions::default())?;
//! assert_eq!(output.document.nodes.len(), 2);
//! let xml = output.to_xml()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Performance
//!
//! With the `parallel` feature, [`copy_batch`] runs independent copies on
//! rayon's thread pool.

pub mod builder;
pub mod diagnostics;
mod error;
pub mod expand;
pub mod format;
pub mod layout;
mod pipeline;
pub mod translate;
pub mod walker;

#[cfg(feature = "parallel")]
mod parallel;

use std::hash::BuildHasherDefault;

use hashbrown::{HashMap as FastHashMap, HashSet as FastHashSet};
use rustc_hash::FxHasher;

pub(crate) type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;
pub(crate) type FxHashSet<K> = FastHashSet<K, BuildHasherDefault<FxHasher>>;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use expand::expand;
pub use format::{format, output_port, FormatError, FormattedValue};
pub use pipeline::{copy_network, CopyOptions, CopyOutput};
pub use translate::{translate, TranslatedNode, Translation};
pub use walker::{discover, discover_many, Discovered, Discovery, GraphWalker};

#[cfg(feature = "parallel")]
pub use parallel::{copy_batch, CopyJob};
