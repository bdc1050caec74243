//! Arnold mapping table.
//!
//! Source types are Maya/MtoA node types; destination types are the Arnold
//! shader names used by `ArnoldShadingNode`. Defaults follow the Arnold
//! shader declarations so that unchanged parameters stay disabled on the
//! destination side.

use crate::policy::{
    AttributePolicy as A, Expansion, MappingEntry, MaterialRule, StaticValue, Transform, Unlisted, ValueKind,
};

/// Shading node class for Arnold shaders.
pub const SHADING_NODE: &str = "ArnoldShadingNode";

/// Table version; bump when tag or attribute vocabulary changes.
pub const VERSION: u32 = 1;

/// Fixed decimal precision for numbers.
pub const PRECISION: usize = 6;

const SURFACE_COLOR: [f64; 3] = [0.2, 0.36, 0.1];
const TEXTURE_COLOR: [f64; 3] = [0.36, 0.25, 0.38];
const MATERIAL_COLOR: [f64; 3] = [0.4, 0.35, 0.2];
const LAYER_COLOR_HINT: [f64; 3] = [0.2, 0.56, 0.1];

const WRAP_MODES: &[&str] = &["periodic", "black", "clamp", "mirror", "file"];
const COORD_SPACES: &[&str] = &["world", "object", "Pref"];
const NOISE_SPACES: &[&str] = &["world", "object", "Pref", "UV"];
const TRANSFORM_SPACES: &[&str] = &["world", "object", "camera", "screen", "tangent"];
const VOLUME_INTERPOLATION: &[&str] = &["closest", "trilinear", "tricubic"];
const TX: Transform = Transform::TexturePath("tx");

const BLEND_MODES: &[&str] = &[
    "Normal",
    "Lighten",
    "Darken",
    "Multiply",
    "Average",
    "Add",
    "Subtract",
    "Difference",
    "Negation",
    "Exclusion",
    "Screen",
    "Overlay",
    "Soft Light",
    "Hard Light",
    "Color Dodge",
    "Color Burn",
    "Linear Dodge",
    "Linear Burn",
    "Linear Light",
    "Vivid Light",
    "Pin Light",
    "Hard Mix",
    "Reflect",
    "Glow",
    "Phoenix",
];

const WHITE: [f64; 3] = [1.0, 1.0, 1.0];
const BLACK: [f64; 3] = [0.0, 0.0, 0.0];

const NETWORK_MATERIAL: &[A] = &[
    A::port("aiSurfaceShader").to("arnoldSurface"),
    A::port("surfaceShader").to("arnoldSurface"),
    A::port("aiVolumeShader").to("arnoldSurface"),
    A::port("volumeShader").to("arnoldSurface"),
    A::port("displacementShader").to("arnoldDisplacement"),
];

static MATERIAL: MaterialRule = MaterialRule {
    surface: &["aiSurfaceShader", "surfaceShader", "aiVolumeShader", "volumeShader"],
    passthrough: &[("aiWriteColor", "beauty"), ("aiWriteFloat", "beauty")],
    bump: Some(("normalCamera", "arnoldBump")),
};

const STANDARD: &[A] = &[
    A::float("Kd", 0.7),
    A::color("color", WHITE).to("Kd_color").gated("Kd"),
    A::float("diffuseRoughness", 0.0).to("diffuse_roughness").gated("Kd"),
    A::float("Kb", 0.0).gated("Kd"),
    A::float("directDiffuse", 1.0).to("direct_diffuse").gated("Kd"),
    A::float("indirectDiffuse", 1.0).to("indirect_diffuse").gated("Kd"),
    A::float("Ks", 0.0),
    A::color("KsColor", WHITE).to("Ks_color").gated("Ks"),
    A::float("specularRoughness", 0.466905).to("specular_roughness").gated("Ks"),
    A::float("specularAnisotropy", 0.5).to("specular_anisotropy").gated("Ks"),
    A::enumeration("specularDistribution", &["beckmann", "ggx"], 0)
        .to("specular_distribution")
        .gated("Ks"),
    A::float("specularRotation", 0.0).to("specular_rotation").gated("Ks"),
    A::float("directSpecular", 1.0).to("direct_specular").gated("Ks"),
    A::float("indirectSpecular", 1.0).to("indirect_specular").gated("Ks"),
    A::float("Kr", 0.0),
    A::color("KrColor", WHITE).to("Kr_color").gated("Kr"),
    A::color("reflectionExitColor", BLACK).to("reflection_exit_color").gated("Kr"),
    A::float("Kt", 0.0),
    A::color("KtColor", WHITE).to("Kt_color").gated("Kt"),
    A::color("transmittance", WHITE).gated("Kt"),
    A::float("refractionRoughness", 0.0).to("refraction_roughness").gated("Kt"),
    A::float("IOR", 1.0).gated("Kt"),
    A::float("dispersionAbbe", 0.0).to("dispersion_abbe").gated("Kt"),
    A::float("emission", 0.0),
    A::color("emissionColor", WHITE).to("emission_color").gated("emission"),
    A::float("Ksss", 0.0),
    A::color("KsssColor", WHITE).to("Ksss_color").gated("Ksss"),
    A::enumeration("sssProfile", &["empirical", "cubic"], 0).to("sss_profile").gated("Ksss"),
    A::color("sssRadius", [0.1, 0.1, 0.1]).to("sss_radius").gated("Ksss"),
    A::float("bounceFactor", 1.0).to("bounce_factor"),
    A::color("opacity", WHITE),
];

const AL_SURFACE: &[A] = &[
    A::float("diffuseStrength", 1.0),
    A::color("diffuseColor", [0.18, 0.18, 0.18]).gated("diffuseStrength"),
    A::float("diffuseRoughness", 0.0).gated("diffuseStrength"),
    A::float("sssMix", 0.0).gated("diffuseStrength"),
    A::enumeration("sssMode", &["cubic", "diffusion", "directional", "empirical"], 0).gated("sssMix"),
    A::float("sssDensityScale", 1.0).gated("sssMix"),
    A::float("specular1Strength", 1.0),
    A::color("specular1Color", WHITE).gated("specular1Strength"),
    A::float("specular1Roughness", 0.3).gated("specular1Strength"),
    A::enumeration("specular1FresnelMode", &["dielectric", "metallic"], 0).gated("specular1Strength"),
    A::float("specular1Ior", 1.4).gated("specular1Strength"),
    A::int("specular1IndirectClamp", 0)
        .transform(Transform::Override(StaticValue::Int(1)))
        .gated("specular1Strength"),
    A::string("specular1Distribution", "beckmann")
        .transform(Transform::Override(StaticValue::Str("ggx")))
        .gated("specular1Strength"),
    A::float("specular2Strength", 0.0),
    A::color("specular2Color", WHITE).gated("specular2Strength"),
    A::float("specular2Roughness", 0.5).gated("specular2Strength"),
    A::float("specular2Ior", 1.4).gated("specular2Strength"),
    A::int("specular2IndirectClamp", 0)
        .transform(Transform::Override(StaticValue::Int(1)))
        .gated("specular2Strength"),
    A::string("specular2Distribution", "beckmann")
        .transform(Transform::Override(StaticValue::Str("ggx")))
        .gated("specular2Strength"),
    A::float("transmissionStrength", 0.0),
    A::color("transmissionColor", WHITE).gated("transmissionStrength"),
    A::float("transmissionRoughness", 0.0).gated("transmissionStrength"),
    A::float("transmissionIor", 1.4).gated("transmissionStrength"),
    A::float("emissionStrength", 0.0),
    A::color("emissionColor", WHITE).gated("emissionStrength"),
    A::color("opacity", WHITE),
];

const AL_HAIR: &[A] = &[
    A::float("melanin", 0.15),
    A::color("dyeColor", WHITE),
    A::float("specularWidth", 3.0),
    A::float("specularShift", 4.0),
    A::color("opacity", WHITE),
    A::float("diffuseStrength", 0.0),
    A::color("diffuseColor", WHITE).gated("diffuseStrength"),
    A::enumeration("diffuseScatteringMode", &["kajiya-kay", "dual-scattering"], 0).gated("diffuseStrength"),
    A::float("specular1Strength", 1.0),
    A::color("specular1Color", WHITE).gated("specular1Strength"),
    A::float("specular2Strength", 1.0),
    A::color("specular2Color", WHITE).gated("specular2Strength"),
    A::float("glintStrength", 2.0).gated("specular2Strength"),
    A::float("transmissionStrength", 1.0),
    A::color("transmissionColor", WHITE).gated("transmissionStrength"),
    A::int("dualDepth", 0).transform(Transform::Override(StaticValue::Int(1))),
    A::float("diffuseIndirectStrength", 0.0).transform(Transform::Override(StaticValue::Float(1.0))),
    A::int("extraSamplesDiffuse", 0).transform(Transform::Override(StaticValue::Int(2))),
    A::int("extraSamplesGlossy", 0).transform(Transform::Override(StaticValue::Int(2))),
    A::int("aovDepth", 0).to("aov_depth"),
];

const IMAGE: &[A] = &[
    A::path("filename").transform(TX),
    A::enumeration("filter", &["closest", "bilinear", "bicubic", "smart_bicubic"], 3),
    A::int("mipmapBias", 0).to("mipmap_bias"),
    A::boolean("ignoreMissingTiles", false).to("ignore_missing_tiles"),
    A::color("missingTileColor", BLACK)
        .to("missing_tile_color")
        .gated("ignoreMissingTiles"),
    A::color("multiply", WHITE),
    A::color("offset", BLACK),
    A::string("uvset", ""),
    A::float("soffset", 0.0),
    A::float("toffset", 0.0),
    A::enumeration("swrap", WRAP_MODES, 0),
    A::enumeration("twrap", WRAP_MODES, 0),
    A::float("sscale", 1.0),
    A::float("tscale", 1.0),
    A::boolean("sflip", false),
    A::boolean("tflip", false),
    A::boolean("swapSt", false).to("swap_st"),
];

const NOISE: &[A] = &[
    A::int("octaves", 1),
    A::float("distortion", 0.0),
    A::float("lacunarity", 1.92),
    A::float("amplitude", 1.0),
    A::vector("scale", WHITE),
    A::vector("offset", BLACK),
    A::enumeration("coordSpace", COORD_SPACES, 0).to("coord_space"),
];

const LUMINANCE: &[A] = &[A::color("value", BLACK).to("input")];

// Maya's blendColors and Arnold's mix cross their two inputs.
const MIX: &[A] = &[
    A::color("color1", [1.0, 0.0, 0.0]).to("input2"),
    A::color("color2", [0.0, 0.0, 1.0]).to("input1"),
    A::float("blender", 0.5).to("mix"),
];

const CLAMP: &[A] = &[
    A::color("input", BLACK),
    A::float("min", 0.0).transform(Transform::ReduceMin),
    A::float("max", 1.0).transform(Transform::ReduceMax),
];

const RAMP: &[A] = &[
    A::enumeration("type", &["v", "u", "diagonal", "radial", "circular"], 0),
    A::enumeration(
        "interpolation",
        &["none", "linear", "exponentialUp", "exponentialDown", "smooth", "bump", "spike"],
        1,
    ),
    A::ramp("colorEntryList").to("ramp"),
];

const AMBIENT_OCCLUSION: &[A] = &[
    A::int("samples", 3),
    A::float("spread", 1.0),
    A::float("nearClip", 0.0).to("near_clip"),
    A::float("farClip", 100.0).to("far_clip"),
    A::float("falloff", 0.0),
    A::color("black", BLACK),
    A::color("white", WHITE),
    A::color("opacity", WHITE),
    A::boolean("invertNormals", false).to("invert_normals"),
    A::boolean("selfOnly", false).to("self_only"),
];

const BUMP: &[A] = &[
    A::float("bumpValue", 0.0).to("bump_map"),
    A::float("bumpDepth", 1.0).to("bump_height"),
];

// Written in full: the expansion sets every field of a tangent-to-world
// normal transform.
const SPACE_TRANSFORM: &[A] = &[
    A::float("bumpValue", 0.0).to("input"),
    A::float("bumpDepth", 1.0).to("scale"),
    A::enumeration("type", &["point", "vector", "normal"], 0).always(),
    A::enumeration("order", &["XYZ", "XZY", "YXZ", "YZX", "ZXY", "ZYX"], 0),
    A::boolean("invert_x", false).always(),
    A::boolean("invert_y", false).always(),
    A::boolean("invert_z", false).always(),
    A::boolean("color_to_signed", false).always(),
    A::enumeration("from", TRANSFORM_SPACES, 0).always(),
    A::enumeration("to", TRANSFORM_SPACES, 0).always(),
    A::new("tangent", ValueKind::Vector),
    A::boolean("set_normal", false).always(),
];

const RANGE: &[A] = &[A::port("displacement").to("input")];

const TWO_SIDED: &[A] = &[A::color("front", WHITE).always(), A::color("back", BLACK).always()];

const VOLUME_COLLECTOR: &[A] = &[
    A::enumeration("scatteringSource", &["parameter", "channel"], 0).to("scattering_source"),
    A::string("scatteringChannel", "").to("scattering_channel"),
    A::float("scattering", 1.0),
    A::color("scatteringColor", WHITE).to("scattering_color"),
    A::float("scatteringIntensity", 1.0).to("scattering_intensity"),
    A::float("anisotropy", 0.0),
    A::enumeration("attenuationSource", &["parameter", "channel", "scattering"], 0).to("attenuation_source"),
    A::string("attenuationChannel", "").to("attenuation_channel"),
    A::float("attenuation", 1.0),
    A::color("attenuationColor", WHITE).to("attenuation_color"),
    A::float("attenuationIntensity", 1.0).to("attenuation_intensity"),
    A::enumeration("attenuationMode", &["absorption", "extinction"], 0).to("attenuation_mode"),
    A::enumeration("emissionSource", &["parameter", "channel"], 0).to("emission_source"),
    A::string("emissionChannel", "").to("emission_channel"),
    A::float("emission", 0.0),
    A::color("emissionColor", WHITE).to("emission_color"),
    A::float("emissionIntensity", 1.0).to("emission_intensity"),
    A::vector("positionOffset", BLACK).to("position_offset"),
    A::enumeration("interpolation", VOLUME_INTERPOLATION, 1),
];

const VOLUME_SAMPLE_FLOAT: &[A] = &[
    A::string("channel", ""),
    A::vector("positionOffset", BLACK).to("position_offset"),
    A::enumeration("interpolation", VOLUME_INTERPOLATION, 1),
    A::float("inputMin", 0.0).to("input_min"),
    A::float("inputMax", 1.0).to("input_max"),
    A::float("contrast", 1.0),
    A::float("contrastPivot", 0.5).to("contrast_pivot"),
    A::float("bias", 0.5),
    A::float("gain", 0.5),
    A::float("outputMin", 0.0).to("output_min"),
    A::float("outputMax", 1.0).to("output_max"),
    A::boolean("clampMin", false).to("clamp_min"),
    A::boolean("clampMax", false).to("clamp_max"),
];

const VOLUME_SAMPLE_RGB: &[A] = &[
    A::string("channel", ""),
    A::vector("positionOffset", BLACK).to("position_offset"),
    A::enumeration("interpolation", VOLUME_INTERPOLATION, 1),
    A::float("gamma", 1.0),
    A::float("hueShift", 0.0).to("hue_shift"),
    A::float("saturation", 1.0),
    A::float("contrast", 1.0),
    A::float("contrastPivot", 0.18).to("contrast_pivot"),
    A::float("exposure", 0.0),
    A::color("multiply", WHITE),
    A::color("add", BLACK),
];

const COMBINE_FLOAT: &[A] = &[
    A::float("input1", 0.0),
    A::float("input2", 0.0),
    A::float("input3", 0.0),
    A::enumeration(
        "combineOp",
        &["multiply 1*2", "add 1+2", "divide 1/2", "subtract 1-2", "lerp(1, 2, 3)"],
        0,
    ),
];

const COMBINE_COLOR: &[A] = &[
    A::color("input1", BLACK),
    A::color("input2", BLACK),
    A::float("input3", 0.0),
    A::enumeration(
        "combineOp",
        &[
            "multiply 1*2",
            "add 1+2",
            "divide 1/2",
            "subtract 1-2",
            "lerp(1, 2, 3)",
            "dot(1, 2)",
            "distance(1 -> 2)",
            "cross(1, 2)",
        ],
        0,
    ),
];

const LAYER_COLOR: &[A] = &[
    A::color("layer1", BLACK),
    A::float("layer1a", 0.0),
    A::enumeration("layer1blend", BLEND_MODES, 0),
    A::color("layer2", BLACK),
    A::float("layer2a", 0.0),
    A::enumeration("layer2blend", BLEND_MODES, 0),
    A::color("layer3", BLACK),
    A::float("layer3a", 0.0),
    A::enumeration("layer3blend", BLEND_MODES, 0),
    A::color("layer4", BLACK),
    A::float("layer4a", 0.0),
    A::enumeration("layer4blend", BLEND_MODES, 0),
    A::color("layer5", BLACK),
    A::float("layer5a", 0.0),
    A::enumeration("layer5blend", BLEND_MODES, 0),
    A::color("layer6", BLACK),
    A::float("layer6a", 0.0),
    A::enumeration("layer6blend", BLEND_MODES, 0),
    A::color("layer7", BLACK),
    A::float("layer7a", 0.0),
    A::enumeration("layer7blend", BLEND_MODES, 0),
    A::color("layer8", BLACK),
    A::float("layer8a", 0.0),
    A::enumeration("layer8blend", BLEND_MODES, 0),
];

const LAYER_FLOAT: &[A] = &[
    A::float("layer1", 0.0),
    A::float("layer1a", 0.0),
    A::float("layer2", 0.0),
    A::float("layer2a", 0.0),
    A::float("layer3", 0.0),
    A::float("layer3a", 0.0),
    A::float("layer4", 0.0),
    A::float("layer4a", 0.0),
    A::float("layer5", 0.0),
    A::float("layer5a", 0.0),
    A::float("layer6", 0.0),
    A::float("layer6a", 0.0),
    A::float("layer7", 0.0),
    A::float("layer7a", 0.0),
    A::float("layer8", 0.0),
    A::float("layer8a", 0.0),
];

const USER_DATA_RGB: &[A] = &[
    A::string("colorAttrName", "").to("attribute"),
    A::color("defaultValue", BLACK).to("default"),
];

const USER_DATA_FLOAT: &[A] = &[
    A::string("floatAttrName", "").to("attribute"),
    A::float("defaultValue", 0.0).to("default"),
];

const AOV_WRITE_RGB: &[A] = &[
    A::color("beauty", BLACK).to("passthrough"),
    A::color("input", BLACK).to("aov_input"),
    A::string("aovName", "").to("aov_name"),
    A::boolean("blend", false).to("blend_opacity"),
];

const AOV_WRITE_FLOAT: &[A] = &[
    A::color("beauty", BLACK).to("passthrough"),
    A::float("input", 0.0).to("aov_input"),
    A::string("aovName", "").to("aov_name"),
];

// alShaders remap controls shared by the float-producing nodes.
const INPUT_SCALAR: &[A] = &[
    A::enumeration(
        "input",
        &["facing-ratio", "area", "face-index", "ray-length", "ray-depth", "User"],
        0,
    ),
    A::string("userName", ""),
    A::float("RMPinputMin", 0.0),
    A::float("RMPinputMax", 1.0),
    A::float("RMPcontrast", 1.0),
    A::float("RMPcontrastPivot", 0.5),
    A::float("RMPbias", 0.5),
    A::float("RMPgain", 0.5),
    A::float("RMPoutputMin", 0.0),
    A::float("RMPoutputMax", 1.0),
    A::boolean("RMPclampEnable", false),
    A::boolean("RMPthreshold", false),
    A::float("RMPclampMin", 0.0),
    A::float("RMPclampMax", 1.0),
];

const INPUT_VECTOR: &[A] = &[
    A::enumeration(
        "input",
        &["P", "Po", "N", "Nf", "Ng", "Ngf", "Ns", "dPdu", "dPdv", "Ld", "Rd", "uv", "User", "Custom"],
        0,
    ),
    A::string("userName", ""),
    A::vector("vector", BLACK),
    A::enumeration("type", &["Point", "Vector"], 0),
    A::new("matrix", ValueKind::FloatArray),
    A::enumeration("coordinates", &["cartesian", "spherical", "normalized spherical"], 0),
];

const CURVATURE: &[A] = &[
    A::enumeration("mode", &["positive", "negative"], 0),
    A::int("samples", 3),
    A::float("sampleRadius", 0.1),
    A::string("traceSet", ""),
    A::float("RMPinputMin", 0.0),
    A::float("RMPinputMax", 1.0),
    A::float("RMPcontrast", 1.0),
    A::float("RMPcontrastPivot", 0.5),
    A::float("RMPbias", 0.5),
    A::float("RMPgain", 0.5),
    A::float("RMPoutputMin", 0.0),
    A::float("RMPoutputMax", 1.0),
    A::boolean("RMPclampEnable", false),
    A::boolean("RMPthreshold", false),
    A::float("RMPclampMin", 0.0),
    A::float("RMPclampMax", 1.0),
    A::color("color1", BLACK),
    A::color("color2", WHITE),
];

const JITTER_COLOR: &[A] = &[
    A::color("input", [0.5, 0.5, 0.5]),
    A::float("minSaturation", 0.0),
    A::float("maxSaturation", 0.0),
    A::float("minGain", 0.0),
    A::float("maxGain", 0.0),
    A::float("minHueOffset", 0.0),
    A::float("maxHueOffset", 0.0),
    A::boolean("clamp", true),
    A::float("signal", 0.0),
];

const SWITCH_COLOR: &[A] = &[
    A::color("inputA", BLACK),
    A::color("inputB", BLACK),
    A::color("inputC", BLACK),
    A::color("inputD", BLACK),
    A::color("inputE", BLACK),
    A::color("inputF", BLACK),
    A::color("inputG", BLACK),
    A::color("inputH", BLACK),
    A::float("mix", 0.0),
    A::float("threshold", 0.5),
];

const SWITCH_FLOAT: &[A] = &[
    A::float("inputA", 0.0),
    A::float("inputB", 0.0),
    A::float("inputC", 0.0),
    A::float("inputD", 0.0),
    A::float("inputE", 0.0),
    A::float("inputF", 0.0),
    A::float("inputG", 0.0),
    A::float("inputH", 0.0),
    A::float("mix", 0.0),
    A::float("threshold", 0.5),
];

const TRIPLANAR: &[A] = &[
    A::color("input", BLACK),
    A::path("texture").transform(TX),
    A::enumeration("space", COORD_SPACES, 0),
    A::enumeration("normal", &["geometric", "smooth", "smooth-NoBump"], 0),
    A::enumeration("tiling", &["regular", "cellnoise"], 0),
    A::float("frequency", 1.0),
    A::int("mipMapBias", 0),
    A::float("blendSoftness", 0.1),
    A::float("cellSoftness", 0.1),
    A::float("scalex", 1.0),
    A::float("scaley", 1.0),
    A::float("scalez", 1.0),
    A::float("offsetx", 0.0),
    A::float("offsety", 0.0),
    A::float("offsetz", 0.0),
    A::float("rotx", 0.0),
    A::float("roty", 0.0),
    A::float("rotz", 0.0),
    A::float("rotjitterx", 1.0),
    A::float("rotjittery", 1.0),
    A::float("rotjitterz", 1.0),
];

const REMAP_COLOR: &[A] = &[
    A::color("input", BLACK),
    A::float("gamma", 1.0),
    A::float("saturation", 1.0),
    A::float("hueOffset", 0.0),
    A::float("contrast", 1.0),
    A::float("contrastPivot", 0.18),
    A::float("gain", 1.0),
    A::float("exposure", 0.0),
    A::float("mask", 1.0),
];

const REMAP_FLOAT: &[A] = &[
    A::float("input", 0.0),
    A::float("RMPinputMin", 0.0),
    A::float("RMPinputMax", 1.0),
    A::float("RMPcontrast", 1.0),
    A::float("RMPcontrastPivot", 0.5),
    A::float("RMPbias", 0.5),
    A::float("RMPgain", 0.5),
    A::float("RMPoutputMin", 0.0),
    A::float("RMPoutputMax", 1.0),
    A::boolean("RMPclampEnable", false),
    A::boolean("RMPthreshold", false),
    A::float("RMPclampMin", 0.0),
    A::float("RMPclampMax", 1.0),
    A::float("mask", 1.0),
];

const LAYER: &[A] = &[
    A::port("layer1"),
    A::port("layer2"),
    A::float("mix", 0.0),
    A::enumeration("debug", &["off", "layer1", "layer2", "mixer"], 0),
];

const CELL_NOISE: &[A] = &[
    A::enumeration("space", NOISE_SPACES, 0),
    A::float("frequency", 1.0),
    A::enumeration("mode", &["features", "chips"], 0),
    A::float("randomness", 1.0),
    A::int("octaves", 1),
    A::float("lacunarity", 2.121),
    A::float("RMPinputMin", 0.0),
    A::float("RMPinputMax", 1.0),
    A::float("RMPcontrast", 1.0),
    A::float("RMPcontrastPivot", 0.5),
    A::float("RMPbias", 0.5),
    A::float("RMPgain", 0.5),
    A::float("RMPoutputMin", 0.0),
    A::float("RMPoutputMax", 1.0),
    A::boolean("RMPclampEnable", false),
    A::boolean("RMPthreshold", false),
    A::float("RMPclampMin", 0.0),
    A::float("RMPclampMax", 1.0),
    A::color("color1", BLACK),
    A::color("color2", WHITE),
    A::boolean("smoothChips", false),
    A::boolean("randomChips", false),
    A::color("chipColor1", BLACK),
    A::float("chipProb1", 1.0),
    A::color("chipColor2", BLACK),
    A::float("chipProb2", 1.0),
    A::color("chipColor3", BLACK),
    A::float("chipProb3", 1.0),
    A::color("chipColor4", BLACK),
    A::float("chipProb4", 1.0),
    A::color("chipColor5", BLACK),
    A::float("chipProb5", 1.0),
    A::new("P", ValueKind::Vector),
];

const FLAKE: &[A] = &[
    A::enumeration("space", &["tangent", "world"], 0),
    A::float("amount", 1.0),
    A::float("size", 0.01),
    A::float("divergence", 0.5),
    A::new("P", ValueKind::Vector),
];

const FLOW_NOISE: &[A] = &[
    A::enumeration("space", NOISE_SPACES, 0),
    A::float("frequency", 1.0),
    A::int("octaves", 8),
    A::float("lacunarity", 2.121),
    A::float("gain", 0.5),
    A::float("angle", 0.0),
    A::float("advection", 0.25),
    A::boolean("turbulent", false),
    A::float("RMPinputMin", 0.0),
    A::float("RMPinputMax", 1.0),
    A::float("RMPcontrast", 1.0),
    A::float("RMPcontrastPivot", 0.5),
    A::float("RMPbias", 0.5),
    A::float("RMPgain", 0.5),
    A::float("RMPoutputMin", 0.0),
    A::float("RMPoutputMax", 1.0),
    A::boolean("RMPclampEnable", false),
    A::boolean("RMPthreshold", false),
    A::float("RMPclampMin", 0.0),
    A::float("RMPclampMax", 1.0),
    A::color("color1", BLACK),
    A::color("color2", WHITE),
    A::new("P", ValueKind::Vector),
];

const FRACTAL: &[A] = &[
    A::enumeration("mode", &["scalar", "vector"], 0),
    A::enumeration("space", NOISE_SPACES, 0),
    A::vector("scale", WHITE),
    A::float("frequency", 1.0),
    A::float("time", 0.0),
    A::int("octaves", 8),
    A::float("distortion", 0.0),
    A::float("lacunarity", 2.121),
    A::float("gain", 0.5),
    A::boolean("turbulent", false),
    A::float("RMPinputMin", 0.0),
    A::float("RMPinputMax", 1.0),
    A::float("RMPcontrast", 1.0),
    A::float("RMPcontrastPivot", 0.5),
    A::float("RMPbias", 0.5),
    A::float("RMPgain", 0.5),
    A::float("RMPoutputMin", 0.0),
    A::float("RMPoutputMax", 1.0),
    A::boolean("RMPclampEnable", false),
    A::boolean("RMPthreshold", false),
    A::float("RMPclampMin", 0.0),
    A::float("RMPclampMax", 1.0),
    A::color("color1", BLACK),
    A::color("color2", WHITE),
    A::new("P", ValueKind::Vector),
];

/// All Arnold mapping entries.
///
/// `rampFloat`, `facingRatio`, `two_sided` and `spaceTransform` never occur
/// in a source scene; expansions create them.
pub static ENTRIES: &[MappingEntry] = &[
    MappingEntry::new("shadingEngine", "networkMaterial", "NetworkMaterial")
        .color(MATERIAL_COLOR)
        .unlisted(Unlisted::Drop)
        .attributes(NETWORK_MATERIAL)
        .expand(Expansion::Material(&MATERIAL)),
    MappingEntry::new("displacementShader", "range", SHADING_NODE)
        .unlisted(Unlisted::Drop)
        .attributes(RANGE)
        .expand(Expansion::SingleInput("displacement"))
        .weight(20),
    MappingEntry::new("aiStandard", "standard", SHADING_NODE)
        .color(SURFACE_COLOR)
        .attributes(STANDARD),
    MappingEntry::new("alSurface", "alSurface", SHADING_NODE)
        .color(SURFACE_COLOR)
        .attributes(AL_SURFACE),
    MappingEntry::new("alLayer", "alLayer", SHADING_NODE)
        .color(LAYER_COLOR_HINT)
        .attributes(LAYER),
    MappingEntry::new("alHair", "alHair", SHADING_NODE)
        .color(SURFACE_COLOR)
        .attributes(AL_HAIR),
    MappingEntry::new("aiVolumeCollector", "volume_collector", SHADING_NODE).attributes(VOLUME_COLLECTOR),
    MappingEntry::new("aiVolumeSampleFloat", "volume_sample_float", SHADING_NODE).attributes(VOLUME_SAMPLE_FLOAT),
    MappingEntry::new("aiVolumeSampleRgb", "volume_sample_rgb", SHADING_NODE).attributes(VOLUME_SAMPLE_RGB),
    MappingEntry::new("alInputScalar", "alInputScalar", SHADING_NODE).attributes(INPUT_SCALAR),
    MappingEntry::new("alInputVector", "alInputVector", SHADING_NODE).attributes(INPUT_VECTOR),
    MappingEntry::new("aiImage", "image", SHADING_NODE)
        .color(TEXTURE_COLOR)
        .attributes(IMAGE),
    MappingEntry::new("aiNoise", "noise", SHADING_NODE).attributes(NOISE),
    MappingEntry::new("alCellNoise", "alCellNoise", SHADING_NODE).attributes(CELL_NOISE),
    MappingEntry::new("alFlake", "alFlake", SHADING_NODE).attributes(FLAKE),
    MappingEntry::new("alFlowNoise", "alFlowNoise", SHADING_NODE).attributes(FLOW_NOISE),
    MappingEntry::new("alFractal", "alFractal", SHADING_NODE).attributes(FRACTAL),
    MappingEntry::new("luminance", "luminance", SHADING_NODE).attributes(LUMINANCE),
    MappingEntry::new("blendColors", "mix", SHADING_NODE).attributes(MIX),
    MappingEntry::new("clamp", "clamp", SHADING_NODE).attributes(CLAMP),
    MappingEntry::new("ramp", "ramp", SHADING_NODE)
        .attributes(RAMP)
        .expand(Expansion::MixRamp {
            knots: "colorEntryList",
            float_ramp: "rampFloat",
        }),
    MappingEntry::new("rampFloat", "rampFloat", SHADING_NODE).attributes(RAMP),
    MappingEntry::new("aiAmbientOcclusion", "ambientOcclusion", SHADING_NODE).attributes(AMBIENT_OCCLUSION),
    MappingEntry::new("bump2d", "bump2d", SHADING_NODE)
        .attributes(BUMP)
        .expand(Expansion::NormalBump {
            transform: "spaceTransform",
        })
        .weight(10),
    MappingEntry::new("spaceTransform", "spaceTransform", SHADING_NODE)
        .attributes(SPACE_TRANSFORM)
        .weight(10),
    MappingEntry::new("samplerInfo", "samplerInfo", SHADING_NODE).expand(Expansion::Sampler {
        facing_ratio: "facingRatio",
        flipped_normal: "two_sided",
    }),
    MappingEntry::new("facingRatio", "facingRatio", SHADING_NODE),
    MappingEntry::new("two_sided", "two_sided", SHADING_NODE).attributes(TWO_SIDED),
    MappingEntry::new("alCombineColor", "alCombineColor", SHADING_NODE).attributes(COMBINE_COLOR),
    MappingEntry::new("alCombineFloat", "alCombineFloat", SHADING_NODE).attributes(COMBINE_FLOAT),
    MappingEntry::new("alCurvature", "alCurvature", SHADING_NODE).attributes(CURVATURE),
    MappingEntry::new("alJitterColor", "alJitterColor", SHADING_NODE).attributes(JITTER_COLOR),
    MappingEntry::new("alLayerColor", "alLayerColor", SHADING_NODE).attributes(LAYER_COLOR),
    MappingEntry::new("alLayerFloat", "alLayerFloat", SHADING_NODE).attributes(LAYER_FLOAT),
    MappingEntry::new("alSwitchColor", "alSwitchColor", SHADING_NODE).attributes(SWITCH_COLOR),
    MappingEntry::new("alSwitchFloat", "alSwitchFloat", SHADING_NODE).attributes(SWITCH_FLOAT),
    MappingEntry::new("alTriplanar", "alTriplanar", SHADING_NODE)
        .color(TEXTURE_COLOR)
        .attributes(TRIPLANAR),
    MappingEntry::new("alRemapColor", "alRemapColor", SHADING_NODE).attributes(REMAP_COLOR),
    MappingEntry::new("alRemapFloat", "alRemapFloat", SHADING_NODE).attributes(REMAP_FLOAT),
    MappingEntry::new("aiUserDataColor", "user_data_rgb", SHADING_NODE).attributes(USER_DATA_RGB),
    MappingEntry::new("aiUserDataFloat", "user_data_float", SHADING_NODE).attributes(USER_DATA_FLOAT),
    MappingEntry::new("aiWriteColor", "aov_write_rgb", SHADING_NODE).attributes(AOV_WRITE_RGB),
    MappingEntry::new("aiWriteFloat", "aov_write_float", SHADING_NODE).attributes(AOV_WRITE_FLOAT),
];
