//! Node placement for the destination editor.
//!
//! Source positions are reused when every node has one. Otherwise nodes are
//! placed as a tree hanging from the root: each node sits centred above the
//! nodes that feed it, one row per step upstream. Siblings are ordered by
//! their table weight, lightest first, and keep discovery order on ties.

use shadeclip_tables::RendererTable;

use crate::walker::Discovered;

/// Horizontal space taken by one node.
pub const NODE_WIDTH: f64 = 200.0;

/// Gap between neighbouring subtrees.
pub const NODE_SPACING: f64 = 60.0;

/// Vertical distance between rows.
pub const ROW_HEIGHT: f64 = 100.0;

/// Compute a position for every discovered node, in discovery order.
pub fn layout(nodes: &[Discovered<'_>], table: &RendererTable) -> Vec<[f64; 2]> {
    let source: Option<Vec<[f64; 2]>> = nodes.iter().map(|d| d.node.position).collect();
    match source {
        Some(positions) if !positions.is_empty() => positions,
        _ => tree_layout(nodes, table),
    }
}

fn tree_layout(nodes: &[Discovered<'_>], table: &RendererTable) -> Vec<[f64; 2]> {
    let count = nodes.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots = Vec::new();
    for (index, discovered) in nodes.iter().enumerate() {
        match discovered.parent {
            Some(parent) => children[parent].push(index),
            None => roots.push(index),
        }
    }

    let weight = |index: usize| table.entry(&nodes[index].node.node_type).map_or(0, |e| e.weight);
    for siblings in &mut children {
        siblings.sort_by_key(|&index| weight(index));
    }

    // Pre-order puts every child after its parent, so a reverse pass sees
    // children first.
    let mut span = vec![NODE_WIDTH; count];
    for index in (0..count).rev() {
        let row = row_span(&children[index], &span);
        span[index] = span[index].max(row);
    }

    let mut positions = vec![[0.0, 0.0]; count];
    let mut cursor = roots.first().map_or(0.0, |&root| -span[root] / 2.0);
    for &root in &roots {
        positions[root] = [cursor + span[root] / 2.0, 0.0];
        cursor += span[root] + NODE_SPACING;
    }

    for index in 0..count {
        let [x, _] = positions[index];
        let mut left = x - row_span(&children[index], &span) / 2.0;
        for &child in &children[index] {
            positions[child] = [left + span[child] / 2.0, nodes[child].depth as f64 * ROW_HEIGHT];
            left += span[child] + NODE_SPACING;
        }
    }

    positions
}

/// Width of a row of subtrees.
fn row_span(row: &[usize], span: &[f64]) -> f64 {
    if row.is_empty() {
        return 0.0;
    }
    row.iter().map(|&i| span[i]).sum::<f64>() + NODE_SPACING * (row.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use shadeclip_common::{MemoryScene, ShadingNode};
    use shadeclip_tables::Renderer;

    use super::*;
    use crate::walker::{discover, discover_many};

    #[test]
    fn test_single_chain() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG1", "shadingEngine").input("surfaceShader", "std1", "outColor"),
            ShadingNode::new("std1", "aiStandard"),
        ])
        .unwrap();
        let discovery = discover(&scene, "SG1").unwrap();
        assert_eq!(layout(&discovery.nodes, Renderer::Arnold.table()), vec![[0.0, 0.0], [0.0, 100.0]]);
    }

    #[test]
    fn test_children_centred() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("mix", "blendColors")
                .input("color1", "a", "outColor")
                .input("color2", "b", "outColor"),
            ShadingNode::new("a", "aiNoise"),
            ShadingNode::new("b", "aiNoise"),
        ])
        .unwrap();
        let discovery = discover(&scene, "mix").unwrap();
        let positions = layout(&discovery.nodes, Renderer::Arnold.table());

        // Two leaves: 200 + 60 + 200 wide, centred on the root.
        assert_eq!(positions[0], [0.0, 0.0]);
        assert_eq!(positions[1], [-130.0, 100.0]);
        assert_eq!(positions[2], [130.0, 100.0]);
    }

    #[test]
    fn test_several_roots_side_by_side() {
        let scene = MemoryScene::from_nodes([ShadingNode::new("a", "aiNoise"), ShadingNode::new("b", "aiNoise")]).unwrap();
        let discovery = discover_many(&scene, &["a", "b"]).unwrap();
        assert_eq!(layout(&discovery.nodes, Renderer::Arnold.table()), vec![[0.0, 0.0], [260.0, 0.0]]);
    }

    #[test]
    fn test_source_positions_reused() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG1", "shadingEngine")
                .input("surfaceShader", "std1", "outColor")
                .at(10.0, 20.0),
            ShadingNode::new("std1", "aiStandard").at(-5.0, 40.0),
        ])
        .unwrap();
        let discovery = discover(&scene, "SG1").unwrap();
        assert_eq!(layout(&discovery.nodes, Renderer::Arnold.table()), vec![[10.0, 20.0], [-5.0, 40.0]]);
    }

    #[test]
    fn test_partial_positions_ignored() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG1", "shadingEngine")
                .input("surfaceShader", "std1", "outColor")
                .at(10.0, 20.0),
            ShadingNode::new("std1", "aiStandard"),
        ])
        .unwrap();
        let discovery = discover(&scene, "SG1").unwrap();
        assert_eq!(layout(&discovery.nodes, Renderer::Arnold.table()), vec![[0.0, 0.0], [0.0, 100.0]]);
    }

    #[test]
    fn test_heavy_children_last() {
        // The displacement is found first but weighs more than the surface.
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG1", "shadingEngine")
                .input("displacementShader", "disp", "displacement")
                .input("surfaceShader", "std1", "outColor"),
            ShadingNode::new("disp", "displacementShader"),
            ShadingNode::new("std1", "aiStandard"),
        ])
        .unwrap();
        let discovery = discover(&scene, "SG1").unwrap();
        assert_eq!(discovery.names().collect::<Vec<_>>(), ["SG1", "disp", "std1"]);

        let positions = layout(&discovery.nodes, Renderer::Arnold.table());
        assert_eq!(positions[2], [-130.0, 100.0]);
        assert_eq!(positions[1], [130.0, 100.0]);
    }
}
