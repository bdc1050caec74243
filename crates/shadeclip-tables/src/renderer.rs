//! Renderer selection and indexed table lookup.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::policy::MappingEntry;
use crate::{arnold, prman, Error};

/// A mapping table with a source-type index.
#[derive(Debug)]
pub struct RendererTable {
    name: &'static str,
    version: u32,
    precision: usize,
    entries: &'static [MappingEntry],
    index: FxHashMap<&'static str, usize>,
}

impl RendererTable {
    /// Index a static entry list. Later duplicates are ignored.
    pub fn new(
        name: &'static str,
        version: u32,
        precision: usize,
        entries: &'static [MappingEntry],
    ) -> Self {
        let mut index = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.source_type).or_insert(i);
        }
        Self {
            name,
            version,
            precision,
            entries,
            index,
        }
    }

    /// Renderer name as written to documents.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Table version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Decimal places for numbers.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Look up the entry for a source node type.
    pub fn entry(&self, source_type: &str) -> Option<&'static MappingEntry> {
        self.index.get(source_type).map(|&i| &self.entries[i])
    }

    /// Whether the source node type is supported.
    pub fn supports(&self, source_type: &str) -> bool {
        self.index.contains_key(source_type)
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &'static [MappingEntry] {
        self.entries
    }

    /// Supported source node types in declaration order.
    pub fn source_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.source_type)
    }
}

static ARNOLD: LazyLock<RendererTable> =
    LazyLock::new(|| RendererTable::new("arnold", arnold::VERSION, arnold::PRECISION, arnold::ENTRIES));

static PRMAN: LazyLock<RendererTable> =
    LazyLock::new(|| RendererTable::new("prman", prman::VERSION, prman::PRECISION, prman::ENTRIES));

/// Target renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Renderer {
    /// Arnold.
    #[default]
    Arnold,
    /// RenderMan.
    Prman,
}

impl Renderer {
    /// Every supported renderer.
    pub const ALL: [Renderer; 2] = [Renderer::Arnold, Renderer::Prman];

    /// The renderer's mapping table.
    pub fn table(self) -> &'static RendererTable {
        match self {
            Renderer::Arnold => &ARNOLD,
            Renderer::Prman => &PRMAN,
        }
    }

    /// Short name.
    pub fn as_str(self) -> &'static str {
        match self {
            Renderer::Arnold => "arnold",
            Renderer::Prman => "prman",
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Renderer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arnold" => Ok(Renderer::Arnold),
            "prman" | "renderman" => Ok(Renderer::Prman),
            _ => Err(Error::UnknownRenderer(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::policy::{Expansion, ValueKind};

    #[test]
    fn test_no_duplicate_source_types() {
        for renderer in Renderer::ALL {
            let table = renderer.table();
            let unique: HashSet<_> = table.source_types().collect();
            assert_eq!(unique.len(), table.entries().len(), "{renderer}");
        }
    }

    #[test]
    fn test_no_duplicate_attribute_policies() {
        for renderer in Renderer::ALL {
            for entry in renderer.table().entries() {
                let sources: HashSet<_> = entry.attributes.iter().map(|p| p.source).collect();
                assert_eq!(sources.len(), entry.attributes.len(), "{}", entry.source_type);
            }
        }
    }

    #[test]
    fn test_gates_reference_listed_attributes() {
        for renderer in Renderer::ALL {
            for entry in renderer.table().entries() {
                for policy in entry.attributes {
                    if let Some(gate) = policy.gate {
                        assert!(entry.policy(gate).is_some(), "{}.{}", entry.source_type, gate);
                    }
                }
            }
        }
    }

    #[test]
    fn test_arnold_lookup() {
        let table = Renderer::Arnold.table();
        assert_eq!(table.name(), "arnold");
        assert_eq!(table.precision(), 6);

        let image = table.entry("aiImage").unwrap();
        assert_eq!(image.dest_type, "image");
        assert!(table.entry("PxrSurface").is_none());
        assert!(!table.supports("lambert"));

        let sg = table.entry("shadingEngine").unwrap();
        assert_eq!(sg.dest_type, "networkMaterial");
        assert_eq!(sg.dest_input("surfaceShader"), "arnoldSurface");
        assert_eq!(sg.dest_input("displacementShader"), "arnoldDisplacement");
    }

    #[test]
    fn test_prman_lookup() {
        let table = Renderer::Prman.table();
        assert_eq!(table.precision(), 5);

        let surface = table.entry("PxrSurface").unwrap();
        assert_eq!(surface.dest_type, "PxrSurface");
        assert!(matches!(
            surface.expansion,
            Expansion::ArrayConnector { input: "utilityPattern", .. }
        ));
        assert!(table.supports(crate::prman::ARRAY_CONNECTOR));
        assert_eq!(table.entry("PxrDisplace").unwrap().weight, 20);
        for name in ["PxrHair", "PxrLMMetal", "PxrBlack", "PxrProjectionLayer", "PxrRandomTextureManifold"] {
            assert!(table.supports(name), "{name}");
        }

        let sg = table.entry("shadingEngine").unwrap();
        assert_eq!(sg.dest_input("surfaceShader"), "prmanBxdf");

        let texture = table.entry("PxrTexture").unwrap();
        assert!(matches!(
            texture.policy("filter").unwrap().kind,
            ValueKind::EnumIndex(_)
        ));
    }

    #[test]
    fn test_arnold_covers_source_types() {
        let table = Renderer::Arnold.table();
        for name in [
            "displacementShader",
            "alLayer",
            "alLayerFloat",
            "alCombineFloat",
            "alCurvature",
            "alJitterColor",
            "alSwitchColor",
            "alSwitchFloat",
            "alTriplanar",
            "alRemapColor",
            "alRemapFloat",
            "alInputScalar",
            "alInputVector",
            "alCellNoise",
            "alFlake",
            "alFlowNoise",
            "alFractal",
            "aiWriteFloat",
            "aiVolumeCollector",
            "aiVolumeSampleFloat",
            "aiVolumeSampleRgb",
            "samplerInfo",
        ] {
            assert!(table.supports(name), "{name}");
        }

        let layers = table.entry("alLayerColor").unwrap();
        assert!(layers.policy("layer8blend").is_some());
        assert_eq!(table.entry("aiWriteFloat").unwrap().dest_input("beauty"), "passthrough");
        assert_eq!(table.entry("bump2d").unwrap().weight, 10);
        assert_eq!(table.entry("spaceTransform").unwrap().weight, 10);
        assert_eq!(table.entry("displacementShader").unwrap().weight, 20);
        assert_eq!(table.entry("displacementShader").unwrap().dest_input("displacement"), "input");
    }

    #[test]
    fn test_expansion_targets_are_listed() {
        for renderer in Renderer::ALL {
            let table = renderer.table();
            for entry in table.entries() {
                let created = match entry.expansion {
                    Expansion::ArrayConnector { connector, .. } => vec![connector],
                    Expansion::MixRamp { float_ramp, .. } => vec![float_ramp, "blendColors"],
                    Expansion::ConnectorRamp { connector, fill, .. } => vec![connector, fill],
                    Expansion::Sampler {
                        facing_ratio,
                        flipped_normal,
                    } => vec![facing_ratio, flipped_normal],
                    Expansion::NormalBump { transform } => vec![transform],
                    Expansion::None | Expansion::SingleInput(_) | Expansion::Material(_) => Vec::new(),
                };
                for name in created {
                    assert!(table.supports(name), "{} creates unknown {}", entry.source_type, name);
                }
            }
        }
    }

    #[test]
    fn test_renderer_from_str() {
        assert_eq!("Arnold".parse::<Renderer>().unwrap(), Renderer::Arnold);
        assert_eq!("renderman".parse::<Renderer>().unwrap(), Renderer::Prman);
        assert_eq!(Renderer::Prman.to_string(), "prman");
        assert!(matches!(
            "cycles".parse::<Renderer>(),
            Err(Error::UnknownRenderer(name)) if name == "cycles"
        ));
    }
}
