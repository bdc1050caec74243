//! Document assembly.
//!
//! Takes translated nodes and resolved connections and produces a closed
//! [`Document`]: every connection refers to ids of nodes in the document.

use shadeclip_common::Connection;
use shadeclip_tables::RendererTable;
use shadeclip_xml::{DocConnection, DocNode, Document};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::format::output_port;
use crate::translate::{TranslatedNode, Translation};
use crate::FxHashMap;

/// Assemble a document.
///
/// Nodes are emitted in the order received. Connections touching an
/// unsupported node are dropped, as are extra connections into an input
/// already fed; the first connection in discovery order wins. Array plugs
/// keep their index, so `utilityPattern[0]` and `utilityPattern[1]` are
/// different inputs.
pub fn build(
    translations: Vec<Translation>,
    edges: &[Connection],
    group: &str,
    table: &RendererTable,
    placeholders: bool,
    diagnostics: &mut Diagnostics,
) -> Document {
    let mut document = Document::new(group, table.name(), table.version());
    document.connections = rewrite_edges(&translations, edges, diagnostics);

    for translation in translations {
        match translation {
            Translation::Node(node) => document.nodes.push(into_doc_node(node)),
            Translation::Unsupported(placeholder) => {
                if placeholders {
                    document.placeholders.push(placeholder);
                }
            }
        }
    }

    document
}

fn rewrite_edges(translations: &[Translation], edges: &[Connection], diagnostics: &mut Diagnostics) -> Vec<DocConnection> {
    let by_name: FxHashMap<&str, &Translation> = translations.iter().map(|t| (t.name(), t)).collect();
    let lookup = |name: &str| by_name.get(name).and_then(|t| t.as_node());

    let mut kept: FxHashMap<(&str, String), &str> = FxHashMap::default();
    let mut connections = Vec::with_capacity(edges.len());

    for edge in edges {
        let (Some(source), Some(target)) = (lookup(&edge.source), lookup(&edge.target)) else {
            diagnostics.push(Diagnostic::DanglingConnection {
                source: edge.source.clone(),
                output: edge.output.clone(),
                target: edge.target.clone(),
                input: edge.input.clone(),
            });
            continue;
        };

        let input = target.dest_input(&edge.input);
        if let Some(first) = kept.get(&(target.id.as_str(), input.clone())) {
            diagnostics.push(Diagnostic::ConflictingInputs {
                node: target.name.clone(),
                input,
                kept: first.to_string(),
                dropped: source.name.clone(),
            });
            continue;
        }
        kept.insert((target.id.as_str(), input.clone()), source.name.as_str());

        connections.push(DocConnection {
            source: source.id.clone(),
            output: output_port(&edge.output).to_string(),
            target: target.id.clone(),
            input,
        });
    }

    connections
}

fn into_doc_node(node: TranslatedNode) -> DocNode {
    DocNode {
        id: node.id,
        name: node.name,
        node_type: node.dest_type.to_string(),
        class: node.class.to_string(),
        position: node.position,
        color: node.color,
        parameters: node.parameters,
    }
}

#[cfg(test)]
mod tests {
    use shadeclip_common::ShadingNode;
    use shadeclip_tables::Renderer;

    use super::*;
    use crate::translate::translate;

    fn translate_all(nodes: &[ShadingNode], renderer: Renderer) -> (Vec<Translation>, Vec<Connection>) {
        let mut diagnostics = Diagnostics::new();
        let mut edges = Vec::new();
        let mut translations = Vec::new();
        for node in nodes {
            let incoming: Vec<Connection> = node
                .connections
                .iter()
                .map(|c| Connection::from_incoming(&node.name, c))
                .collect();
            translations.push(translate(node, &incoming, node.name.clone(), renderer.table(), &mut diagnostics));
            edges.extend(incoming);
        }
        (translations, edges)
    }

    #[test]
    fn test_edges_rewritten() {
        let nodes = [
            ShadingNode::new("SG1", "shadingEngine").input("surfaceShader", "std1", "outColor"),
            ShadingNode::new("std1", "aiStandard").input("color", "file1", "outColorR"),
            ShadingNode::new("file1", "aiImage"),
        ];
        let (translations, edges) = translate_all(&nodes, Renderer::Arnold);
        let mut diagnostics = Diagnostics::new();
        let doc = build(translations, &edges, "SG1", Renderer::Arnold.table(), true, &mut diagnostics);

        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.renderer, "arnold");
        assert_eq!(doc.table_version, 1);
        assert_eq!(
            doc.connections,
            vec![
                DocConnection {
                    source: "std1".into(),
                    output: "out".into(),
                    target: "SG1".into(),
                    input: "arnoldSurface".into(),
                },
                DocConnection {
                    source: "file1".into(),
                    output: "out.r".into(),
                    target: "std1".into(),
                    input: "Kd_color".into(),
                },
            ]
        );
        assert!(doc.validate().is_ok());
        assert!(diagnostics.as_slice().is_empty());
    }

    #[test]
    fn test_unsupported_edges_dropped() {
        let nodes = [
            ShadingNode::new("SG1", "shadingEngine").input("surfaceShader", "lambert1", "outColor"),
            ShadingNode::new("lambert1", "lambert").input("color", "file1", "outColor"),
            ShadingNode::new("file1", "aiImage"),
        ];
        let (translations, edges) = translate_all(&nodes, Renderer::Arnold);
        let mut diagnostics = Diagnostics::new();
        let doc = build(translations, &edges, "SG1", Renderer::Arnold.table(), true, &mut diagnostics);

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.placeholders.len(), 1);
        assert!(doc.connections.is_empty());
        assert!(doc.validate().is_ok());
        assert_eq!(
            diagnostics
                .as_slice()
                .iter()
                .filter(|d| matches!(d, Diagnostic::DanglingConnection { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_placeholders_optional() {
        let nodes = [ShadingNode::new("cam1", "camera")];
        let (translations, edges) = translate_all(&nodes, Renderer::Arnold);
        let doc = build(translations, &edges, "cam1", Renderer::Arnold.table(), false, &mut Diagnostics::new());
        assert!(doc.placeholders.is_empty());
        assert!(doc.nodes.is_empty());
    }

    #[test]
    fn test_conflicting_inputs_keep_first() {
        // surfaceShader and aiSurfaceShader both map to arnoldSurface.
        let nodes = [
            ShadingNode::new("SG1", "shadingEngine")
                .input("aiSurfaceShader", "al1", "outColor")
                .input("surfaceShader", "std1", "outColor"),
            ShadingNode::new("al1", "alSurface"),
            ShadingNode::new("std1", "aiStandard"),
        ];
        let (translations, edges) = translate_all(&nodes, Renderer::Arnold);
        let mut diagnostics = Diagnostics::new();
        let doc = build(translations, &edges, "SG1", Renderer::Arnold.table(), true, &mut diagnostics);

        assert_eq!(doc.connections.len(), 1);
        assert_eq!(doc.connections[0].source, "al1");
        assert_eq!(
            diagnostics.as_slice(),
            [Diagnostic::ConflictingInputs {
                node: "SG1".into(),
                input: "arnoldSurface".into(),
                kept: "al1".into(),
                dropped: "std1".into(),
            }]
        );
    }

    #[test]
    fn test_indexed_plugs_do_not_conflict() {
        let nodes = [
            ShadingNode::new("surf", "PxrSurface")
                .input("utilityPattern[0]", "aov1", "resultAOV")
                .input("utilityPattern[1]", "aov2", "resultAOV"),
            ShadingNode::new("aov1", "PxrMatteID"),
            ShadingNode::new("aov2", "PxrMatteID"),
        ];
        let (translations, edges) = translate_all(&nodes, Renderer::Prman);
        let mut diagnostics = Diagnostics::new();
        let doc = build(translations, &edges, "surf", Renderer::Prman.table(), true, &mut diagnostics);

        let inputs: Vec<_> = doc.connections.iter().map(|c| c.input.as_str()).collect();
        assert_eq!(inputs, ["utilityPattern[0]", "utilityPattern[1]"]);
        assert!(diagnostics.as_slice().is_empty());
    }
}
