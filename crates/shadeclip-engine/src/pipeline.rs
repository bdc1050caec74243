//! The copy operation: walk, expand, translate, lay out and build.

use shadeclip_common::SceneGraph;
use shadeclip_tables::Renderer;
use shadeclip_xml::Document;
use tracing::info;

use crate::builder::build;
use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
use crate::expand::expand;
use crate::layout::layout;
use crate::translate::{assign_ids, translate, Translation};
use crate::walker::discover_many;
use crate::Result;

/// Options for one copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Target renderer.
    pub renderer: Renderer,
    /// Assign editor positions to nodes.
    pub layout: bool,
    /// Write a comment for every unsupported node.
    pub placeholders: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            renderer: Renderer::Arnold,
            layout: true,
            placeholders: true,
        }
    }
}

impl CopyOptions {
    /// Options for the given renderer with everything else at defaults.
    pub fn for_renderer(renderer: Renderer) -> Self {
        Self {
            renderer,
            ..Self::default()
        }
    }
}

/// Result of a copy.
#[derive(Debug, Clone)]
pub struct CopyOutput {
    /// The interchange document.
    pub document: Document,
    /// Non-fatal problems, in the order found.
    pub diagnostics: Vec<Diagnostic>,
}

impl CopyOutput {
    /// Serialize the document.
    pub fn to_xml(&self) -> Result<String> {
        Ok(self.document.to_xml_string()?)
    }

    /// Number of warning diagnostics.
    pub fn warnings(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
            .count()
    }
}

/// Copy the networks upstream of `roots` into one document.
///
/// The document group is named after the first root as found in the scene,
/// even when expansion renames that node. Fails only when a root cannot be
/// resolved; every other problem becomes a diagnostic.
pub fn copy_network<S, R>(scene: &S, roots: &[R], options: &CopyOptions) -> Result<CopyOutput>
where
    S: SceneGraph + ?Sized,
    R: AsRef<str>,
{
    let table = options.renderer.table();
    let mut discovery = discover_many(scene, roots)?;
    let group = discovery.nodes[0].node.name.clone();

    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(std::mem::take(&mut discovery.diagnostics));

    let discovery = expand(discovery, table, &mut diagnostics);
    let ids = assign_ids(discovery.names());
    let positions = options.layout.then(|| layout(&discovery.nodes, table));

    let mut translations = Vec::with_capacity(discovery.nodes.len());
    for (index, id) in ids.into_iter().enumerate() {
        let node = &discovery.nodes[index].node;
        let mut translation = translate(node, discovery.incoming(index), id, table, &mut diagnostics);
        if let Translation::Node(translated) = &mut translation {
            translated.position = positions.as_ref().map(|p| p[index]);
        }
        translations.push(translation);
    }

    let document = build(
        translations,
        &discovery.edges,
        &group,
        table,
        options.placeholders,
        &mut diagnostics,
    );

    info!(
        group = %group,
        renderer = %options.renderer,
        nodes = document.nodes.len(),
        connections = document.connections.len(),
        unsupported = diagnostics
            .as_slice()
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnsupportedNode { .. }))
            .count(),
        warnings = diagnostics.count(Severity::Warning),
        "copied shading network"
    );

    Ok(CopyOutput {
        document,
        diagnostics: diagnostics.into_vec(),
    })
}

#[cfg(test)]
mod tests {
    use shadeclip_common::{MemoryScene, RampKnot, ShadingNode};
    use shadeclip_xml::{parse_document, ParamValue};

    use super::*;
    use crate::Error;

    fn scene(json: &str) -> MemoryScene {
        MemoryScene::from_json(json).unwrap()
    }

    fn arnold_scene() -> MemoryScene {
        scene(include_str!("../testdata/arnold_standard.json"))
    }

    fn copy(scene: &MemoryScene, root: &str, renderer: Renderer) -> CopyOutput {
        copy_network(scene, &[root], &CopyOptions::for_renderer(renderer)).unwrap()
    }

    #[test]
    fn test_arnold_network() {
        let output = copy(&arnold_scene(), "woodSG", Renderer::Arnold);
        let doc = &output.document;

        // The shading group takes its shader's name.
        let ids: Vec<_> = doc.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["wood_mtl", "wood_mtl_out", "wood_tex", "uv_name", "grain_ramp", "wood_bump", "wood_noise"]
        );
        assert_eq!(doc.group, "woodSG");
        assert_eq!(
            output.diagnostics,
            [Diagnostic::DroppedAttribute {
                node: "wood_mtl".into(),
                node_type: "shadingEngine".into(),
                attribute: "memberCount".into(),
            }]
        );
        assert_eq!(output.warnings(), 0);
        assert!(doc.validate().is_ok());

        let sg = doc.node("wood_mtl").unwrap();
        assert_eq!(sg.node_type, "networkMaterial");
        assert_eq!(sg.class, "NetworkMaterial");
        assert!(sg.parameters.is_empty());

        let material = doc.node("wood_mtl_out").unwrap();
        let names: Vec<_> = material.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["diffuse_roughness"]);

        let texture = doc.node("wood_tex").unwrap();
        assert_eq!(
            texture.parameter("filename"),
            Some(&ParamValue::String("C:/textures/wood_diffuse.tx".into()))
        );
        assert_eq!(texture.parameter("swrap"), Some(&ParamValue::Enum("mirror".into())));
        assert!(texture.parameter("filter").is_none());

        let noise = doc.node("wood_noise").unwrap();
        assert_eq!(noise.parameter("coord_space"), Some(&ParamValue::Enum("object".into())));
    }

    #[test]
    fn test_arnold_connections() {
        let output = copy(&arnold_scene(), "woodSG", Renderer::Arnold);
        let edges: Vec<_> = output
            .document
            .connections
            .iter()
            .map(|c| format!("{}.{}->{}.{}", c.source, c.output, c.target, c.input))
            .collect();

        assert_eq!(
            edges,
            [
                "wood_mtl_out.out->wood_mtl.arnoldSurface",
                "wood_bump.out->wood_mtl.arnoldDisplacement",
                "wood_tex.out->wood_mtl_out.Kd_color",
                "grain_ramp.out.r->wood_mtl_out.Kr",
                "uv_name.out->wood_tex.uvset",
                "wood_noise.out.a->wood_bump.bump_map",
            ]
        );
    }

    #[test]
    fn test_tree_layout_positions() {
        let output = copy(&arnold_scene(), "woodSG", Renderer::Arnold);
        let position = |id: &str| output.document.node(id).unwrap().position.unwrap();

        assert_eq!(position("wood_mtl"), [0.0, 0.0]);
        assert_eq!(position("wood_mtl_out"), [-130.0, 100.0]);
        assert_eq!(position("wood_bump"), [260.0, 100.0]);
        assert_eq!(position("wood_tex"), [-260.0, 200.0]);
        assert_eq!(position("grain_ramp"), [0.0, 200.0]);
        assert_eq!(position("uv_name"), [-260.0, 300.0]);
        assert_eq!(position("wood_noise"), [260.0, 200.0]);
    }

    #[test]
    fn test_layout_disabled() {
        let options = CopyOptions {
            layout: false,
            ..CopyOptions::default()
        };
        let output = copy_network(&arnold_scene(), &["woodSG"], &options).unwrap();
        assert!(output.document.nodes.iter().all(|n| n.position.is_none()));
    }

    #[test]
    fn test_copy_is_deterministic() {
        let first = copy(&arnold_scene(), "woodSG", Renderer::Arnold).to_xml().unwrap();
        let second = copy(&arnold_scene(), "woodSG", Renderer::Arnold).to_xml().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_xml_parses_back() {
        let output = copy(&arnold_scene(), "woodSG", Renderer::Arnold);
        let xml = output.to_xml().unwrap();
        let parsed = parse_document(&xml).unwrap();

        assert_eq!(parsed, output.document);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_vector_channels_survive_xml() {
        let xml = copy(&arnold_scene(), "woodSG", Renderer::Arnold).to_xml().unwrap();
        let parsed = parse_document(&xml).unwrap();

        let Some(ParamValue::Vector3(channels)) = parsed.node("wood_noise").unwrap().parameter("scale") else {
            panic!("scale should be a vector");
        };
        for (text, expected) in channels.iter().zip([0.2, 0.4, 0.6]) {
            let value: f64 = text.parse().unwrap();
            assert!((value - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ramp_keeps_source_order() {
        let output = copy(&arnold_scene(), "woodSG", Renderer::Arnold);
        let ramp = output.document.node("grain_ramp").unwrap();

        assert_eq!(ramp.parameter("type"), Some(&ParamValue::Enum("u".into())));
        assert_eq!(ramp.parameter("interpolation"), Some(&ParamValue::Enum("smooth".into())));
        let Some(ParamValue::Ramp(knots)) = ramp.parameter("ramp") else {
            panic!("ramp should be a ramp");
        };
        let positions: Vec<_> = knots.iter().map(|k| k.position.as_str()).collect();
        assert_eq!(positions, ["0.750000", "0.000000"]);
    }

    #[test]
    fn test_unsupported_node_resilience() {
        let scene = scene(include_str!("../testdata/unsupported.json"));
        let output = copy(&scene, "metalSG", Renderer::Arnold);
        let doc = &output.document;

        assert_eq!(doc.nodes.len(), 4);
        assert_eq!(doc.placeholders.len(), 1);
        assert_eq!(doc.placeholders[0].name, "place1");
        assert_eq!(doc.connections.len(), 3);
        assert!(doc.validate().is_ok());

        let unsupported = output
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnsupportedNode { .. }))
            .count();
        assert_eq!(unsupported, 1);
        assert!(output
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::DanglingConnection { source, .. } if source == "place1")));

        let xml = output.to_xml().unwrap();
        assert!(xml.contains("<!-- unsupported node 'place1' of type 'place2dTexture' -->"));
        assert!(!xml.contains("\"place1\""));
    }

    #[test]
    fn test_cycle_is_reported() {
        let scene = scene(include_str!("../testdata/cycle.json"));
        let output = copy(&scene, "loopSG", Renderer::Arnold);

        assert_eq!(output.document.nodes.len(), 3);
        assert_eq!(output.document.connections.len(), 3);
        assert!(output.document.validate().is_ok());
        assert_eq!(output.warnings(), 1);
        assert!(matches!(
            &output.diagnostics[..],
            [Diagnostic::Topology { source, target, .. }] if source == "lum_a" && target == "lum_b"
        ));
    }

    #[test]
    fn test_prman_network() {
        let scene = scene(include_str!("../testdata/prman_surface.json"));
        let output = copy(&scene, "skinSG", Renderer::Prman);
        let doc = &output.document;

        assert_eq!(doc.renderer, "prman");
        assert_eq!(doc.nodes.len(), 8);
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
        assert!(doc.validate().is_ok());

        let texture = doc.node("skin_tex").unwrap();
        assert_eq!(texture.node_type, "PxrTexture");
        assert_eq!(texture.class, "PrmanShadingNode");
        assert_eq!(
            texture.parameter("filename"),
            Some(&ParamValue::String("maps/skin_albedo.tex".into()))
        );
        assert_eq!(texture.parameter("filter"), Some(&ParamValue::Int("6".into())));
        assert_eq!(texture.parameter("linearize"), Some(&ParamValue::Int("1".into())));

        let manifold = doc.node("skin_uv").unwrap();
        assert_eq!(manifold.parameter("primvarS"), Some(&ParamValue::String("map2".into())));
        assert_eq!(manifold.parameter("primvarT"), Some(&ParamValue::String(String::new())));

        let bxdf = doc.node("skin_bxdf_out").unwrap();
        assert_eq!(bxdf.parameter("diffuseGain"), Some(&ParamValue::Float("0.80000".into())));
        assert_eq!(
            doc.connections_into("skin_bxdf").map(|c| c.input.as_str()).collect::<Vec<_>>(),
            ["prmanBxdf", "prmanDisplacement"]
        );
    }

    #[test]
    fn test_prman_utility_patterns_keep_index() {
        let scene = scene(include_str!("../testdata/prman_surface.json"));
        let doc = copy(&scene, "skinSG", Renderer::Prman).document;

        let connector = doc.node("skin_bxdfConnector").unwrap();
        assert_eq!(connector.node_type, "ShadingNodeArrayConnector");
        assert_eq!(connector.class, "ShadingNodeArrayConnector");

        let patterns: Vec<_> = doc
            .connections_into("skin_bxdf_out")
            .filter(|c| c.input.starts_with("utilityPattern"))
            .map(|c| format!("{}.{}->{}", c.source, c.output, c.input))
            .collect();
        assert_eq!(patterns, ["skin_bxdfConnector.out->utilityPattern"]);

        let inputs: Vec<_> = doc
            .connections_into("skin_bxdfConnector")
            .map(|c| format!("{}->{}", c.source, c.input))
            .collect();
        assert_eq!(inputs, ["skin_id->i0", "skin_tint->i1"]);
    }

    #[test]
    fn test_ramp_with_driven_knots() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG", "shadingEngine").input("surfaceShader", "std", "outColor"),
            ShadingNode::new("std", "aiStandard").input("color", "grad", "outColor"),
            ShadingNode::new("grad", "ramp")
                .attr(
                    "colorEntryList",
                    shadeclip_common::Value::Ramp(vec![
                        RampKnot::color(0.0, [1.0, 0.0, 0.0]),
                        RampKnot::color(0.5, [0.0, 0.5, 0.0]),
                        RampKnot::color(1.0, [0.0, 0.0, 1.0]),
                    ]),
                )
                .input("colorEntryList[0].color", "low", "outColor")
                .input("colorEntryList[2].color", "high", "outColor"),
            ShadingNode::new("low", "aiNoise"),
            ShadingNode::new("high", "aiNoise"),
        ])
        .unwrap();
        let output = copy(&scene, "SG", Renderer::Arnold);
        let doc = &output.document;

        assert_eq!(output.warnings(), 0, "{:?}", output.diagnostics);
        assert!(doc.validate().is_ok());

        let edges = |id: &str| -> Vec<String> {
            doc.connections_into(id)
                .map(|c| format!("{}.{}->{}", c.source, c.output, c.input))
                .collect()
        };
        assert_eq!(edges("std_out"), ["gradMix2.out->Kd_color"]);
        assert_eq!(
            edges("gradMix2"),
            ["high.out->input2", "gradMix.out->input1", "gradWeight2.out->mix"]
        );
        assert_eq!(edges("gradMix"), ["low.out->input1", "grad.out->mix"]);

        // The undriven middle knot keeps its colour.
        assert_eq!(
            doc.node("gradMix").unwrap().parameter("input2"),
            Some(&ParamValue::Color3(["0.000000".into(), "0.500000".into(), "0.000000".into()]))
        );

        let weights = doc.node("grad").unwrap();
        assert_eq!(weights.node_type, "rampFloat");
        let Some(ParamValue::Ramp(knots)) = weights.parameter("ramp") else {
            panic!("weights should be a ramp");
        };
        let channels: Vec<_> = knots.iter().map(|k| k.channels.join(" ")).collect();
        assert_eq!(channels, ["0.000000", "1.000000", "1.000000"]);
    }

    #[test]
    fn test_sampler_and_bump_rewritten() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG", "shadingEngine").input("surfaceShader", "std", "outColor"),
            ShadingNode::new("std", "aiStandard")
                .input("Kd", "info", "facingRatio")
                .input("normalCamera", "nmap", "outNormal"),
            ShadingNode::new("info", "samplerInfo"),
            ShadingNode::new("nmap", "bump2d")
                .attr("bumpInterp", 1i64)
                .attr("bumpDepth", 0.5)
                .input("bumpValue", "tex", "outColor"),
            ShadingNode::new("tex", "aiImage"),
        ])
        .unwrap();
        let output = copy(&scene, "SG", Renderer::Arnold);
        let doc = &output.document;

        assert_eq!(output.warnings(), 0, "{:?}", output.diagnostics);
        assert!(doc.validate().is_ok());
        assert_eq!(doc.node("facingRatio").unwrap().node_type, "facingRatio");

        // The normal map moves from the shader to the material.
        let into_material: Vec<_> = doc.connections_into("std").map(|c| (c.source.as_str(), c.input.as_str())).collect();
        assert_eq!(into_material, [("std_out", "arnoldSurface"), ("nmap", "arnoldBump")]);

        let transform = doc.node("nmap").unwrap();
        assert_eq!(transform.node_type, "spaceTransform");
        assert_eq!(transform.parameter("type"), Some(&ParamValue::Enum("normal".into())));
        assert_eq!(transform.parameter("set_normal"), Some(&ParamValue::Int("1".into())));
        assert_eq!(transform.parameter("scale"), Some(&ParamValue::Float("0.500000".into())));
    }

    #[test]
    fn test_multiple_roots() {
        let output = copy_network(&arnold_scene(), &["woodSG", "stray_noise"], &CopyOptions::default()).unwrap();
        assert_eq!(output.document.group, "woodSG");
        assert_eq!(output.document.nodes.len(), 8);
        assert_eq!(output.document.node("stray_noise").unwrap().position, Some([520.0, 0.0]));
    }

    #[test]
    fn test_colliding_ids() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("mix", "blendColors")
                .input("color1", "mat:wood", "outColor")
                .input("color2", "mat_wood", "outColor"),
            ShadingNode::new("mat:wood", "aiNoise"),
            ShadingNode::new("mat_wood", "aiNoise"),
        ])
        .unwrap();
        let output = copy(&scene, "mix", Renderer::Arnold);
        let doc = &output.document;

        let colon = doc.nodes.iter().find(|n| n.name == "mat:wood").unwrap();
        let underscore = doc.nodes.iter().find(|n| n.name == "mat_wood").unwrap();
        assert!(colon.id.starts_with("mat_wood_"));
        assert!(underscore.id.starts_with("mat_wood_"));
        assert_ne!(colon.id, underscore.id);
        assert_eq!(doc.node("mix").unwrap().id, "mix");
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_suffixed_id_never_shadows_name() {
        let natural = format!("a_b_{:08x}", crc32c::crc32c(b"a:b"));
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("mix", "blendColors")
                .input("color1", "a:b", "outColor")
                .input("color2", "a_b", "outColor")
                .input("blender", natural.as_str(), "outAlpha"),
            ShadingNode::new("a:b", "aiNoise"),
            ShadingNode::new("a_b", "aiNoise"),
            ShadingNode::new(natural.as_str(), "aiNoise"),
        ])
        .unwrap();
        let output = copy(&scene, "mix", Renderer::Arnold);
        let doc = &output.document;

        assert_eq!(doc.nodes.len(), 4);
        assert_eq!(doc.connections.len(), 3);
        assert!(doc.validate().is_ok());
        assert_eq!(doc.nodes.iter().find(|n| n.name == natural).unwrap().id, natural);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = copy_network(&arnold_scene(), &["nope"], &CopyOptions::default());
        assert!(matches!(
            result,
            Err(Error::Scene(shadeclip_common::Error::NotFound(name))) if name == "nope"
        ));
    }
}
