//! Interchange document model for shadeclip.
//!
//! A copied shading network is handed to the destination application as an
//! XML document: one `<node>` element per translated node, an XML comment per
//! node that could not be translated, and a `<connections>` block wiring the
//! nodes together by id.
//!
//! # Example
//!
//! ```
//! use shadeclip_xml::{parse_document, Document};
//!
//! let doc = Document::new("SG1", "arnold", 1);
//! let xml = doc.to_xml_string()?;
//! let parsed = parse_document(&xml)?;
//! assert_eq!(parsed.group, "SG1");
//! parsed.validate()?;
//! # Ok::<(), shadeclip_xml::Error>(())
//! ```

mod document;
mod error;
mod parser;
mod writer;

pub use document::{DocConnection, DocNode, Document, Knot, ParamValue, Parameter, Placeholder};
pub use error::{Error, Result};
pub use parser::parse_document;
pub use writer::ROOT_TAG;
