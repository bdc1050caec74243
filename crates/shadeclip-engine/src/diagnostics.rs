//! Non-fatal problems found while copying a network.
//!
//! A copy never aborts for these. They are collected in order, logged, and
//! returned next to the document.

use std::fmt;

use tracing::{debug, warn};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Expected loss, such as a passed-through attribute.
    Info,
    /// Part of the network could not be copied faithfully.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A non-fatal problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The renderer table has no entry for the node type.
    UnsupportedNode { node: String, node_type: String },

    /// A value could not be formatted with its declared kind and was
    /// written as a string.
    UnsupportedValueKind {
        node: String,
        attribute: String,
        value_type: String,
        kind: &'static str,
    },

    /// A connection closes a cycle back to a node still being walked.
    Topology { source: String, target: String, input: String },

    /// A connection references a node that is missing or untranslatable.
    DanglingConnection {
        source: String,
        output: String,
        target: String,
        input: String,
    },

    /// An attribute the table does not list was passed through.
    UnmappedAttribute {
        node: String,
        node_type: String,
        attribute: String,
    },

    /// An attribute the table does not list was left out.
    DroppedAttribute {
        node: String,
        node_type: String,
        attribute: String,
    },

    /// Several connections feed the same destination input.
    ConflictingInputs {
        node: String,
        input: String,
        kept: String,
        dropped: String,
    },

    /// A connection has no counterpart after expansion and was dropped.
    UnsupportedConnection {
        source: String,
        output: String,
        target: String,
        input: String,
    },
}

impl Diagnostic {
    /// Severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnmappedAttribute { .. } | Diagnostic::DroppedAttribute { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Stable identifier for reports.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::UnsupportedNode { .. } => "unsupported-node",
            Diagnostic::UnsupportedValueKind { .. } => "unsupported-value-kind",
            Diagnostic::Topology { .. } => "topology",
            Diagnostic::DanglingConnection { .. } => "dangling-connection",
            Diagnostic::UnmappedAttribute { .. } => "unmapped-attribute",
            Diagnostic::DroppedAttribute { .. } => "dropped-attribute",
            Diagnostic::ConflictingInputs { .. } => "conflicting-inputs",
            Diagnostic::UnsupportedConnection { .. } => "unsupported-connection",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedNode { node, node_type } => {
                write!(f, "node '{}' of type '{}' has no mapping", node, node_type)
            }
            Diagnostic::UnsupportedValueKind {
                node,
                attribute,
                value_type,
                kind,
            } => write!(
                f,
                "{}.{}: cannot format {} value as {}, written as string",
                node, attribute, value_type, kind
            ),
            Diagnostic::Topology { source, target, input } => {
                write!(f, "cycle: {} feeds {}.{} which is upstream of it", source, target, input)
            }
            Diagnostic::DanglingConnection {
                source,
                output,
                target,
                input,
            } => write!(f, "dropped connection {}.{} -> {}.{}", source, output, target, input),
            Diagnostic::UnmappedAttribute {
                node,
                node_type,
                attribute,
            } => write!(f, "{}.{}: attribute not listed for '{}', passed through", node, attribute, node_type),
            Diagnostic::DroppedAttribute {
                node,
                node_type,
                attribute,
            } => write!(f, "{}.{}: attribute not listed for '{}', dropped", node, attribute, node_type),
            Diagnostic::ConflictingInputs {
                node,
                input,
                kept,
                dropped,
            } => write!(
                f,
                "{}.{} accepts one connection: kept {}, dropped {}",
                node, input, kept, dropped
            ),
            Diagnostic::UnsupportedConnection {
                source,
                output,
                target,
                input,
            } => write!(
                f,
                "connection {}.{} -> {}.{} has no counterpart, dropped",
                source, output, target, input
            ),
        }
    }
}

/// Ordered diagnostic collector that logs as it goes.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => warn!(code = diagnostic.code(), "{}", diagnostic),
            Severity::Info => debug!(code = diagnostic.code(), "{}", diagnostic),
        }
        self.items.push(diagnostic);
    }

    /// Record several diagnostics.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    /// Diagnostics recorded so far.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity() == severity).count()
    }

    /// Take the collected diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_and_display() {
        let unmapped = Diagnostic::UnmappedAttribute {
            node: "std1".into(),
            node_type: "aiStandard".into(),
            attribute: "foo".into(),
        };
        assert_eq!(unmapped.severity(), Severity::Info);
        assert_eq!(unmapped.code(), "unmapped-attribute");

        let dangling = Diagnostic::DanglingConnection {
            source: "a".into(),
            output: "outColor".into(),
            target: "b".into(),
            input: "color".into(),
        };
        assert_eq!(dangling.severity(), Severity::Warning);
        assert_eq!(dangling.to_string(), "dropped connection a.outColor -> b.color");

        let dropped = Diagnostic::DroppedAttribute {
            node: "SG1".into(),
            node_type: "shadingEngine".into(),
            attribute: "customFlag".into(),
        };
        assert_eq!(dropped.severity(), Severity::Info);
        assert_eq!(dropped.code(), "dropped-attribute");
        assert_eq!(
            dropped.to_string(),
            "SG1.customFlag: attribute not listed for 'shadingEngine', dropped"
        );

        let unsupported = Diagnostic::UnsupportedConnection {
            source: "info1".into(),
            output: "uvCoord".into(),
            target: "file1".into(),
            input: "uvCoord".into(),
        };
        assert_eq!(unsupported.severity(), Severity::Warning);
        assert_eq!(unsupported.code(), "unsupported-connection");
    }

    #[test]
    fn test_collector_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::UnsupportedNode {
            node: "cam1".into(),
            node_type: "camera".into(),
        });
        diagnostics.push(Diagnostic::UnmappedAttribute {
            node: "n".into(),
            node_type: "t".into(),
            attribute: "a".into(),
        });

        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(diagnostics.count(Severity::Info), 1);
        assert_eq!(diagnostics.into_vec().len(), 2);
    }
}
