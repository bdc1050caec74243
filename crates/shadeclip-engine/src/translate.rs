//! Node translation.
//!
//! Maps a source node to its destination type and parameter list using a
//! renderer table. Translation of a single node never fails: unknown node
//! types become placeholders and values that cannot be formatted are written
//! as strings, each with a diagnostic.

use shadeclip_common::{Connection, ShadingNode, Value};
use shadeclip_tables::{AttributePolicy, MappingEntry, RendererTable, Transform, Unlisted, ValueKind};
use shadeclip_xml::{ParamValue, Parameter, Placeholder};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::format::{format, FormatError};
use crate::FxHashMap;

/// A source node mapped to its destination form.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedNode {
    /// Stable id in the document.
    pub id: String,
    /// Source node name.
    pub name: String,
    /// Source node type.
    pub source_type: String,
    /// Destination node type.
    pub dest_type: &'static str,
    /// Destination shading node class.
    pub class: &'static str,
    /// Node colour hint.
    pub color: Option<[f64; 3]>,
    /// Position in the destination editor.
    pub position: Option<[f64; 2]>,
    /// Parameters in source attribute order.
    pub parameters: Vec<Parameter>,
    renames: FxHashMap<&'static str, &'static str>,
}

impl TranslatedNode {
    /// Destination input name for a source input plug.
    ///
    /// Only the base attribute is renamed; an array index or child suffix
    /// such as `[2]` or `.color` is kept.
    pub fn dest_input(&self, source_input: &str) -> String {
        let split = source_input.find(|c| c == '[' || c == '.').unwrap_or(source_input.len());
        let (base, suffix) = source_input.split_at(split);
        match self.renames.get(base) {
            Some(dest) => format!("{}{}", dest, suffix),
            None => source_input.to_string(),
        }
    }

    /// Find a parameter by destination name.
    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// Outcome of translating one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// The node has a mapping.
    Node(TranslatedNode),
    /// The node type is not in the table.
    Unsupported(Placeholder),
}

impl Translation {
    /// Source node name.
    pub fn name(&self) -> &str {
        match self {
            Translation::Node(node) => &node.name,
            Translation::Unsupported(placeholder) => &placeholder.name,
        }
    }

    /// The translated node, if supported.
    pub fn as_node(&self) -> Option<&TranslatedNode> {
        match self {
            Translation::Node(node) => Some(node),
            Translation::Unsupported(_) => None,
        }
    }
}

/// Whether a connection feeds the attribute or one of its children.
fn is_connected(incoming: &[Connection], attribute: &str) -> bool {
    incoming.iter().any(|c| {
        c.input
            .strip_prefix(attribute)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with('['))
    })
}

/// Whether the attribute's gate switches it off.
fn gated_off(node: &ShadingNode, entry: &MappingEntry, policy: &AttributePolicy, incoming: &[Connection]) -> bool {
    let Some(parent) = policy.gate else {
        return false;
    };
    if is_connected(incoming, parent) {
        return false;
    }
    match node.attribute(parent) {
        Some(value) => value.is_zero(),
        None => entry
            .policy(parent)
            .and_then(|p| p.default)
            .is_some_and(|d| d.is_zero()),
    }
}

/// Swap a texture path's extension and use forward slashes.
pub fn texture_path(path: &str, extension: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let path = path.replace('\\', "/");
    let (dir, file) = match path.rfind('/') {
        Some(i) => path.split_at(i + 1),
        None => ("", path.as_str()),
    };
    let stem = match file.rfind('.') {
        Some(i) if i > 0 => &file[..i],
        _ => file,
    };
    format!("{}{}.{}", dir, stem, extension)
}

/// Apply a table transform to a value.
pub fn apply_transform(transform: Transform, value: &Value) -> Value {
    match transform {
        Transform::None => value.clone(),
        Transform::TexturePath(extension) => match value.as_str() {
            Some(path) => Value::String(texture_path(path, extension)),
            None => value.clone(),
        },
        Transform::ReduceMin => match value.as_vec3() {
            Some(v) => Value::Float(v.into_iter().fold(f64::INFINITY, f64::min)),
            None => value.clone(),
        },
        Transform::ReduceMax => match value.as_vec3() {
            Some(v) => Value::Float(v.into_iter().fold(f64::NEG_INFINITY, f64::max)),
            None => value.clone(),
        },
        Transform::Override(constant) => constant.to_value(),
        Transform::Remap(pairs) => {
            let remapped = value
                .as_str()
                .and_then(|s| pairs.iter().find(|(from, _)| *from == s))
                .map(|(_, to)| Value::String(to.to_string()));
            remapped.unwrap_or_else(|| value.clone())
        }
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(name: &str) -> String {
    let id: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if id.is_empty() {
        "_".to_string()
    } else {
        id
    }
}

/// Assign a stable document id to each node name.
///
/// Ids are sanitized names. When several names sanitize to the same id, each
/// of them gets the CRC32C of its original name as a suffix, so an id never
/// depends on which of the colliding nodes was found first. A suffixed id
/// that still equals another id is extended again; ids that needed no suffix
/// are never changed.
pub fn assign_ids<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.into_iter().collect();
    let sanitized: Vec<String> = names.iter().map(|n| sanitize(n)).collect();

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for id in &sanitized {
        *counts.entry(id.as_str()).or_default() += 1;
    }

    let mut ids: Vec<String> = names
        .iter()
        .zip(&sanitized)
        .map(|(name, id)| {
            if counts[id.as_str()] > 1 {
                suffixed(id, name)
            } else {
                id.clone()
            }
        })
        .collect();

    let mut taken: FxHashMap<String, usize> = FxHashMap::default();
    for id in &ids {
        *taken.entry(id.clone()).or_default() += 1;
    }
    for (index, name) in names.iter().enumerate() {
        if ids[index] == sanitized[index] {
            continue;
        }
        while taken.get(&ids[index]).is_some_and(|&count| count > 1) {
            if let Some(count) = taken.get_mut(&ids[index]) {
                *count -= 1;
            }
            let crc = crc32c::crc32c_append(crc32c::crc32c(name.as_bytes()), ids[index].as_bytes());
            let extended = format!("{}_{:08x}", ids[index], crc);
            *taken.entry(extended.clone()).or_default() += 1;
            ids[index] = extended;
        }
    }

    ids
}

fn suffixed(id: &str, name: &str) -> String {
    format!("{}_{:08x}", id, crc32c::crc32c(name.as_bytes()))
}

/// Translate one node.
///
/// `incoming` holds the node's resolved incoming connections. Connected
/// attributes are carried by the connection and not written as values.
pub fn translate(
    node: &ShadingNode,
    incoming: &[Connection],
    id: String,
    table: &RendererTable,
    diagnostics: &mut Diagnostics,
) -> Translation {
    let Some(entry) = table.entry(&node.node_type) else {
        diagnostics.push(Diagnostic::UnsupportedNode {
            node: node.name.clone(),
            node_type: node.node_type.clone(),
        });
        return Translation::Unsupported(Placeholder {
            name: node.name.clone(),
            node_type: node.node_type.clone(),
        });
    };

    let mut parameters = Vec::new();
    for (attribute, value) in &node.attributes {
        if is_connected(incoming, attribute) {
            continue;
        }

        let (dest, kind, value) = match entry.policy(attribute) {
            Some(policy) => {
                if policy.kind == ValueKind::Port || gated_off(node, entry, policy, incoming) {
                    continue;
                }
                let value = apply_transform(policy.transform, value);
                if policy.skip_if_default && policy.default.is_some_and(|d| d.matches(&value)) {
                    continue;
                }
                (policy.dest_name(), Some(policy.kind), value)
            }
            None => {
                match entry.unlisted {
                    Unlisted::Drop => {
                        diagnostics.push(Diagnostic::DroppedAttribute {
                            node: node.name.clone(),
                            node_type: node.node_type.clone(),
                            attribute: attribute.clone(),
                        });
                        continue;
                    }
                    Unlisted::Pass => {}
                    Unlisted::Warn => diagnostics.push(Diagnostic::UnmappedAttribute {
                        node: node.name.clone(),
                        node_type: node.node_type.clone(),
                        attribute: attribute.clone(),
                    }),
                }
                (attribute.as_str(), ValueKind::infer(value), value.clone())
            }
        };

        let formatted = match kind {
            Some(kind) => format(&value, kind, table.precision()),
            None => Err(FormatError::UnsupportedValueKind {
                value: value.type_name().to_string(),
                kind: "any",
            }),
        };

        let formatted = formatted.unwrap_or_else(|err| {
            let FormatError::UnsupportedValueKind { value: value_type, kind } = err;
            diagnostics.push(Diagnostic::UnsupportedValueKind {
                node: node.name.clone(),
                attribute: attribute.clone(),
                value_type,
                kind,
            });
            ParamValue::String(value.to_string())
        });

        parameters.push(Parameter::new(dest, formatted));
    }

    debug!(
        node = %node.name,
        dest_type = entry.dest_type,
        parameters = parameters.len(),
        "translated node"
    );

    Translation::Node(TranslatedNode {
        id,
        name: node.name.clone(),
        source_type: node.node_type.clone(),
        dest_type: entry.dest_type,
        class: entry.class,
        color: entry.color,
        position: node.position,
        parameters,
        renames: entry.attributes.iter().map(|p| (p.source, p.dest_name())).collect(),
    })
}
