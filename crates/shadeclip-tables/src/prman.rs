//! RenderMan mapping table.
//!
//! RenderMan patterns and bxdfs keep their names and parameters on both
//! sides, so most entries are identity mappings. Only texture paths,
//! primvar names and the shading engine need rewriting, plus the two
//! array inputs that the destination only accepts through a connector node.

use crate::policy::{AttributePolicy as A, Expansion, MappingEntry, MaterialRule, Transform, Unlisted};

/// Shading node class for RenderMan shaders.
pub const SHADING_NODE: &str = "PrmanShadingNode";

/// Table version; bump when tag or attribute vocabulary changes.
pub const VERSION: u32 = 1;

/// Fixed decimal precision for numbers.
pub const PRECISION: usize = 5;

const SURFACE_COLOR: [f64; 3] = [0.2, 0.36, 0.1];
const TEXTURE_COLOR: [f64; 3] = [0.36, 0.25, 0.38];
const MATERIAL_COLOR: [f64; 3] = [0.4, 0.35, 0.2];

const TEX: Transform = Transform::TexturePath("tex");

const NETWORK_MATERIAL: &[A] = &[
    A::port("surfaceShader").to("prmanBxdf"),
    A::port("volumeShader").to("prmanBxdf"),
    A::port("displacementShader").to("prmanDisplacement"),
];

static MATERIAL: MaterialRule = MaterialRule {
    surface: &["surfaceShader", "volumeShader"],
    passthrough: &[],
    bump: None,
};

/// Type and class of the array connector node.
pub const ARRAY_CONNECTOR: &str = "ShadingNodeArrayConnector";

const UTILITY_PATTERNS: Expansion = Expansion::ArrayConnector {
    input: "utilityPattern",
    connector: ARRAY_CONNECTOR,
};

const RAMP: &[A] = &[A::port("colors")];

const TEXTURE: &[A] = &[
    A::path("filename").transform(TEX),
    A::label_enum(
        "filter",
        &["Nearest", "Box", "Bilinear", "Bspline", "Mitchell", "Catmull-Rom", "Gaussian", "Lagrangian"],
        "Box",
    ),
];

const MULTI_TEXTURE: &[A] = &[
    A::path("filename0").transform(TEX),
    A::path("filename1").transform(TEX),
    A::path("filename2").transform(TEX),
    A::path("filename3").transform(TEX),
    A::path("filename4").transform(TEX),
    A::path("filename5").transform(TEX),
    A::path("filename6").transform(TEX),
    A::path("filename7").transform(TEX),
    A::path("filename8").transform(TEX),
    A::path("filename9").transform(TEX),
];

const LAYERED_TEXTURE: &[A] = &[A::path("filename").transform(TEX)];

// The destination expects UV set names instead of Maya's default primvars.
const MANIFOLD_2D: &[A] = &[
    A::string("primvarS", "")
        .transform(Transform::Remap(&[("u_uvSet", "map2")]))
        .always(),
    A::string("primvarT", "")
        .transform(Transform::Remap(&[("v_uvSet", "")]))
        .always(),
];

const PRIMVAR: &[A] = &[A::string("varname", "")
    .transform(Transform::Remap(&[("Cs", "colorSet")]))
    .always()];

/// All RenderMan mapping entries, shading group first and then in name order.
pub static ENTRIES: &[MappingEntry] = &[
    MappingEntry::new("shadingEngine", "networkMaterial", "NetworkMaterial")
        .color(MATERIAL_COLOR)
        .unlisted(Unlisted::Drop)
        .attributes(NETWORK_MATERIAL)
        .expand(Expansion::Material(&MATERIAL)),
    MappingEntry::new(ARRAY_CONNECTOR, ARRAY_CONNECTOR, ARRAY_CONNECTOR),
    MappingEntry::identity("aaOceanPrmanShader", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrAdjustNormal", SHADING_NODE),
    MappingEntry::identity("PxrAovLight", SHADING_NODE),
    MappingEntry::identity("PxrAttribute", SHADING_NODE),
    MappingEntry::identity("PxrBackgroundDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrBackgroundSampleFilter", SHADING_NODE),
    MappingEntry::identity("PxrBakePointCloud", SHADING_NODE),
    MappingEntry::identity("PxrBakeTexture", SHADING_NODE).color(TEXTURE_COLOR),
    MappingEntry::identity("PxrBarnLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrBlack", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrBlackBody", SHADING_NODE),
    MappingEntry::identity("PxrBlend", SHADING_NODE),
    MappingEntry::identity("PxrBlockerLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrBump", SHADING_NODE),
    MappingEntry::identity("PxrBumpManifold2D", SHADING_NODE),
    MappingEntry::identity("PxrCamera", SHADING_NODE),
    MappingEntry::identity("PxrChecker", SHADING_NODE),
    MappingEntry::identity("PxrClamp", SHADING_NODE),
    MappingEntry::identity("PxrColorCorrect", SHADING_NODE),
    MappingEntry::identity("PxrCombinerLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrConstant", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrCookieLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrCopyAOVDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrCopyAOVSampleFilter", SHADING_NODE),
    MappingEntry::identity("PxrCross", SHADING_NODE),
    MappingEntry::identity("PxrCryptomatte", SHADING_NODE),
    MappingEntry::identity("PxrCurvature", SHADING_NODE),
    MappingEntry::identity("PxrDebugShadingContext", SHADING_NODE),
    MappingEntry::identity("PxrDefault", SHADING_NODE),
    MappingEntry::identity("PxrDiffuse", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrDirectLighting", SHADING_NODE),
    MappingEntry::identity("PxrDirt", SHADING_NODE),
    MappingEntry::identity("PxrDiskLight", SHADING_NODE),
    MappingEntry::identity("PxrDisney", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrDisplace", SHADING_NODE).weight(20),
    MappingEntry::identity("PxrDispScalarLayer", SHADING_NODE),
    MappingEntry::identity("PxrDispTransform", SHADING_NODE),
    MappingEntry::identity("PxrDispVectorLayer", SHADING_NODE),
    MappingEntry::identity("PxrDisplayFilterCombiner", SHADING_NODE),
    MappingEntry::identity("PxrDistantLight", SHADING_NODE),
    MappingEntry::identity("PxrDomeLight", SHADING_NODE),
    MappingEntry::identity("PxrDot", SHADING_NODE),
    MappingEntry::identity("PxrEdgeDetect", SHADING_NODE),
    MappingEntry::identity("PxrEnvDayLight", SHADING_NODE),
    MappingEntry::identity("PxrExposure", SHADING_NODE),
    MappingEntry::identity("PxrFacingRatio", SHADING_NODE),
    MappingEntry::identity("PxrFilmicTonemapperDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrFilmicTonemapperSampleFilter", SHADING_NODE),
    MappingEntry::identity("PxrFlakes", SHADING_NODE),
    MappingEntry::identity("PxrFractal", SHADING_NODE),
    MappingEntry::identity("PxrFractalize", SHADING_NODE),
    MappingEntry::identity("PxrGamma", SHADING_NODE),
    MappingEntry::identity("PxrGeometricAOVs", SHADING_NODE),
    MappingEntry::identity("PxrGlass", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrGoboLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrGradeDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrGradeSampleFilter", SHADING_NODE),
    MappingEntry::identity("PxrHSL", SHADING_NODE),
    MappingEntry::identity("PxrHair", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrHairColor", SHADING_NODE),
    MappingEntry::identity("PxrHalfBufferErrorFilter", SHADING_NODE),
    MappingEntry::identity("PxrImageDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrImagePlaneFilter", SHADING_NODE),
    MappingEntry::identity("PxrIntMultLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrInvert", SHADING_NODE),
    MappingEntry::identity("PxrLMDiffuse", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLMGlass", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLMLayer", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLMMetal", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLMMixer", SHADING_NODE),
    MappingEntry::identity("PxrLMPlastic", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLMSubsurface", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLayer", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrLayerMixer", SHADING_NODE),
    MappingEntry::identity("PxrLayerSurface", SHADING_NODE)
        .color(SURFACE_COLOR)
        .expand(UTILITY_PATTERNS),
    MappingEntry::identity("PxrLayeredBlend", SHADING_NODE),
    MappingEntry::identity("PxrLayeredTexture", SHADING_NODE)
        .color(TEXTURE_COLOR)
        .attributes(LAYERED_TEXTURE),
    MappingEntry::identity("PxrLightEmission", SHADING_NODE),
    MappingEntry::identity("PxrLightProbe", SHADING_NODE),
    MappingEntry::identity("PxrLightSaturation", SHADING_NODE),
    MappingEntry::identity("PxrManifold2D", SHADING_NODE).attributes(MANIFOLD_2D),
    MappingEntry::identity("PxrManifold3D", SHADING_NODE),
    MappingEntry::identity("PxrManifold3DN", SHADING_NODE),
    MappingEntry::identity("PxrMarschnerHair", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrMatteID", SHADING_NODE),
    MappingEntry::identity("PxrMeshLight", SHADING_NODE),
    MappingEntry::identity("PxrMix", SHADING_NODE),
    MappingEntry::identity("PxrMultiTexture", SHADING_NODE).color(TEXTURE_COLOR).attributes(MULTI_TEXTURE),
    MappingEntry::identity("PxrNormalMap", SHADING_NODE),
    MappingEntry::identity("PxrOcclusion", SHADING_NODE),
    MappingEntry::identity("PxrPathTracer", SHADING_NODE),
    MappingEntry::identity("PxrPortalLight", SHADING_NODE),
    MappingEntry::identity("PxrPrimvar", SHADING_NODE).attributes(PRIMVAR),
    MappingEntry::identity("PxrProjectionLayer", SHADING_NODE)
        .color(TEXTURE_COLOR)
        .attributes(LAYERED_TEXTURE),
    MappingEntry::identity("PxrProjectionStack", SHADING_NODE),
    MappingEntry::identity("PxrProjector", SHADING_NODE),
    MappingEntry::identity("PxrPtexture", SHADING_NODE).color(TEXTURE_COLOR),
    MappingEntry::identity("PxrRamp", SHADING_NODE)
        .attributes(RAMP)
        .expand(Expansion::ConnectorRamp {
            knots: "colorRamp",
            input: "colors",
            connector: ARRAY_CONNECTOR,
            fill: "PxrHSL",
            fill_input: "inputRGB",
            fill_output: "resultRGB",
        }),
    MappingEntry::identity("PxrRampLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrRandomTextureManifold", SHADING_NODE),
    MappingEntry::identity("PxrRectLight", SHADING_NODE),
    MappingEntry::identity("PxrRemap", SHADING_NODE),
    MappingEntry::identity("PxrRodLightFilter", SHADING_NODE),
    MappingEntry::identity("PxrRollingShutter", SHADING_NODE),
    MappingEntry::identity("PxrRoundCube", SHADING_NODE),
    MappingEntry::identity("PxrSeExpr", SHADING_NODE),
    MappingEntry::identity("PxrShadedSide", SHADING_NODE),
    MappingEntry::identity("PxrShadowDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrShadowFilter", SHADING_NODE),
    MappingEntry::identity("PxrSkin", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrSphereLight", SHADING_NODE),
    MappingEntry::identity("PxrSurface", SHADING_NODE)
        .color(SURFACE_COLOR)
        .expand(UTILITY_PATTERNS),
    MappingEntry::identity("PxrTangentField", SHADING_NODE),
    MappingEntry::identity("PxrTee", SHADING_NODE),
    MappingEntry::identity("PxrTexture", SHADING_NODE).color(TEXTURE_COLOR).attributes(TEXTURE),
    MappingEntry::identity("PxrThinFilm", SHADING_NODE),
    MappingEntry::identity("PxrThreshold", SHADING_NODE),
    MappingEntry::identity("PxrTileManifold", SHADING_NODE),
    MappingEntry::identity("PxrToFloat", SHADING_NODE),
    MappingEntry::identity("PxrToFloat3", SHADING_NODE),
    MappingEntry::identity("PxrVariable", SHADING_NODE),
    MappingEntry::identity("PxrVary", SHADING_NODE),
    MappingEntry::identity("PxrVolume", SHADING_NODE).color(SURFACE_COLOR),
    MappingEntry::identity("PxrVoronoise", SHADING_NODE),
    MappingEntry::identity("PxrWhitePointDisplayFilter", SHADING_NODE),
    MappingEntry::identity("PxrWhitePointSampleFilter", SHADING_NODE),
    MappingEntry::identity("PxrWorley", SHADING_NODE),
];
