//! Network expansion.
//!
//! Some source constructs have no one-to-one counterpart in the destination
//! renderer: ramps whose knots are driven by textures, sampler nodes with
//! unrelated outputs, shading groups that stand for a material. The table
//! entry of such a node names an [`Expansion`], and this pass rewrites the
//! discovered network into nodes and connections the same table then
//! translates one by one. Created nodes use source vocabulary.
//!
//! Runs between discovery and translation. Material expansions run last,
//! after every other rewrite.

use std::borrow::Cow;

use shadeclip_common::{Connection, KnotValue, RampKnot, ShadingNode, Value};
use shadeclip_tables::{Expansion, MaterialRule, RendererTable};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::walker::{Discovered, Discovery};
use crate::FxHashSet;

/// Output of an array connector.
const CONNECTOR_OUTPUT: &str = "out";

/// Host node blending two colours, and its plugs.
const BLEND: &str = "blendColors";
const BLEND_LOW: &str = "color2";
const BLEND_HIGH: &str = "color1";
const BLEND_WEIGHT: &str = "blender";
const BLEND_OUTPUT: &str = "outColor";

/// Output of a float ramp.
const FLOAT_RAMP_OUTPUT: &str = "outValue";

const FACING_RATIO: &str = "facingRatio";
const FLIPPED_NORMAL: &str = "flippedNormal";

const BUMP_INTERP: &str = "bumpInterp";
/// `bumpInterp` value of a tangent-space normal map.
const TANGENT_NORMAL: i64 = 1;

/// Tangent-space normal to world-space normal.
const TANGENT_TO_WORLD: [(&str, Value); 8] = [
    ("type", Value::Int(2)),
    ("invert_x", Value::Bool(false)),
    ("invert_y", Value::Bool(false)),
    ("invert_z", Value::Bool(false)),
    ("from", Value::Int(4)),
    ("to", Value::Int(0)),
    ("color_to_signed", Value::Bool(true)),
    ("set_normal", Value::Bool(true)),
];

/// Rewrite a discovered network with the table's expansions.
///
/// The result is again in pre-order with parents before children, so it
/// feeds translation and layout like a plain discovery.
pub fn expand<'s>(discovery: Discovery<'s>, table: &RendererTable, diagnostics: &mut Diagnostics) -> Discovery<'s> {
    let mut network = Network::new(discovery);
    let mut materials = Vec::new();

    for slot in 0..network.slots.len() {
        if network.slots[slot].removed {
            continue;
        }
        let expansion = match table.entry(&network.slots[slot].node.node_type) {
            Some(entry) => entry.expansion,
            None => continue,
        };

        match expansion {
            Expansion::None => {}
            Expansion::ArrayConnector { input, connector } => network.array_connector(slot, input, connector),
            Expansion::MixRamp { knots, float_ramp } => network.mix_ramp(slot, knots, float_ramp, diagnostics),
            Expansion::ConnectorRamp {
                knots,
                input,
                connector,
                fill,
                fill_input,
                fill_output,
            } => network.connector_ramp(
                slot,
                RampConnector {
                    knots,
                    input,
                    connector,
                    fill,
                    fill_input,
                    fill_output,
                },
                diagnostics,
            ),
            Expansion::Sampler {
                facing_ratio,
                flipped_normal,
            } => network.sampler(slot, facing_ratio, flipped_normal, diagnostics),
            Expansion::NormalBump { transform } => network.normal_bump(slot, transform),
            Expansion::SingleInput(input) => network.single_input(slot, input, diagnostics),
            Expansion::Material(rule) => materials.push((slot, rule)),
        }
    }

    let mut claimed = FxHashSet::default();
    for (slot, rule) in materials {
        network.material(slot, rule, &mut claimed);
    }

    network.into_discovery()
}

struct RampConnector {
    knots: &'static str,
    input: &'static str,
    connector: &'static str,
    fill: &'static str,
    fill_input: &'static str,
    fill_output: &'static str,
}

struct Slot<'s> {
    node: Cow<'s, ShadingNode>,
    parent: Option<usize>,
    removed: bool,
}

/// A discovered network open for rewriting.
struct Network<'s> {
    slots: Vec<Slot<'s>>,
    /// Live slots in sibling order.
    order: Vec<usize>,
    edges: Vec<Connection>,
    names: FxHashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> Network<'s> {
    fn new(discovery: Discovery<'s>) -> Self {
        let Discovery {
            nodes,
            edges,
            diagnostics,
        } = discovery;
        let names = nodes.iter().map(|d| d.node.name.clone()).collect();
        let slots: Vec<Slot<'s>> = nodes
            .into_iter()
            .map(|d| Slot {
                node: d.node,
                parent: d.parent,
                removed: false,
            })
            .collect();

        Self {
            order: (0..slots.len()).collect(),
            slots,
            edges,
            names,
            diagnostics,
        }
    }

    fn name(&self, slot: usize) -> String {
        self.slots[slot].node.name.clone()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| !s.removed && s.node.name == name)
    }

    /// `base`, or `base` followed by the first free number.
    fn unique_name(&mut self, base: String) -> String {
        let mut name = base.clone();
        let mut n = 1;
        while self.names.contains(&name) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        self.names.insert(name.clone());
        name
    }

    /// Add a node in front of `anchor` in sibling order, or last.
    fn add(&mut self, node: ShadingNode, parent: Option<usize>, anchor: Option<usize>) -> usize {
        let slot = self.slots.len();
        self.slots.push(Slot {
            node: Cow::Owned(node),
            parent,
            removed: false,
        });
        match anchor.and_then(|a| self.order.iter().position(|&s| s == a)) {
            Some(at) => self.order.insert(at, slot),
            None => self.order.push(slot),
        }
        slot
    }

    /// Remove a node. Its children hang from its parent instead.
    fn remove(&mut self, slot: usize) {
        let parent = self.slots[slot].parent;
        for other in &mut self.slots {
            if other.parent == Some(slot) {
                other.parent = parent;
            }
        }
        self.slots[slot].removed = true;
        self.order.retain(|&s| s != slot);
    }

    /// Move `child` under `to` if it hangs from `from`.
    fn adopt(&mut self, child: &str, from: usize, to: usize) {
        if let Some(child) = self.find(child) {
            if self.slots[child].parent == Some(from) {
                self.slots[child].parent = Some(to);
            }
        }
    }

    fn rename(&mut self, slot: usize, name: String) {
        let old = std::mem::replace(&mut self.slots[slot].node.to_mut().name, name.clone());
        for edge in &mut self.edges {
            if edge.source == old {
                edge.source = name.clone();
            }
            if edge.target == old {
                edge.target = name.clone();
            }
        }
        self.names.remove(&old);
        self.names.insert(name);
    }

    fn incoming(&self, target: &str) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.target == target)
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove edges by index, returning them in their original order.
    fn take_edges(&mut self, indices: &[usize]) -> Vec<Connection> {
        let mut index = 0;
        let mut taken = Vec::with_capacity(indices.len());
        self.edges.retain(|edge| {
            let keep = !indices.contains(&index);
            index += 1;
            if !keep {
                taken.push(edge.clone());
            }
            keep
        });
        taken
    }

    /// Remove edges that have no counterpart, reporting each.
    fn drop_edges(&mut self, indices: &[usize], diagnostics: &mut Diagnostics) {
        for edge in self.take_edges(indices) {
            diagnostics.push(Diagnostic::UnsupportedConnection {
                source: edge.source,
                output: edge.output,
                target: edge.target,
                input: edge.input,
            });
        }
    }

    /// Edges driving knot colours of a ramp, as `(knot, edge)` pairs.
    ///
    /// Knot plugs are `base[i]` or `base[i].<...>color` for any of `bases`.
    /// Other plugs under a knot, second connections into one knot and
    /// connections into knots the ramp does not have are dropped.
    fn knot_edges(&mut self, ramp: &str, bases: &[&str], count: usize, diagnostics: &mut Diagnostics) -> Vec<(usize, usize)> {
        let mut seen = FxHashSet::default();
        let mut unsupported = Vec::new();
        for index in self.incoming(ramp) {
            match knot_plug(&self.edges[index].input, bases) {
                None => {}
                Some(Some(knot)) if knot < count && seen.insert(knot) => {}
                Some(_) => unsupported.push(index),
            }
        }
        self.drop_edges(&unsupported, diagnostics);

        self.incoming(ramp)
            .into_iter()
            .filter_map(|index| match knot_plug(&self.edges[index].input, bases) {
                Some(Some(knot)) => Some((knot, index)),
                _ => None,
            })
            .collect()
    }

    fn array_connector(&mut self, slot: usize, input: &str, connector: &str) {
        let name = self.name(slot);
        let mut plugs: Vec<(usize, usize)> = self
            .incoming(&name)
            .into_iter()
            .filter_map(|edge| match array_index(&self.edges[edge].input, input) {
                Some((index, "")) => Some((index, edge)),
                _ => None,
            })
            .collect();

        match plugs.len() {
            0 => {}
            1 => self.edges[plugs[0].1].input = input.to_string(),
            _ => {
                plugs.sort_by_key(|&(index, _)| index);
                let connector_name = self.unique_name(format!("{}Connector", name));
                let anchor = self
                    .find(&self.edges[plugs[0].1].source)
                    .filter(|&s| self.slots[s].parent == Some(slot));
                let node = self.add(ShadingNode::new(connector_name.clone(), connector), Some(slot), anchor);

                let mut edge_indices: Vec<usize> = plugs.iter().map(|&(_, edge)| edge).collect();
                edge_indices.sort_unstable();
                let taken = self.take_edges(&edge_indices);

                for &(index, edge) in &plugs {
                    let Some(position) = edge_indices.iter().position(|&e| e == edge) else {
                        continue;
                    };
                    let mut connection = taken[position].clone();
                    self.adopt(&connection.source, slot, node);
                    connection.target = connector_name.clone();
                    connection.input = format!("i{}", index);
                    self.edges.push(connection);
                }
                self.edges.push(Connection {
                    source: connector_name.clone(),
                    output: CONNECTOR_OUTPUT.to_string(),
                    target: name.clone(),
                    input: input.to_string(),
                });

                debug!(node = %name, connector = %connector_name, inputs = plugs.len(), "gathered array inputs");
            }
        }
    }

    fn mix_ramp(&mut self, slot: usize, knots: &str, float_ramp: &str, diagnostics: &mut Diagnostics) {
        let name = self.name(slot);
        let values = ramp_knots(&self.slots[slot].node, knots);
        let driven = self.knot_edges(&name, &[knots], values.len(), diagnostics);
        if driven.is_empty() {
            return;
        }

        // A single driven knot is the whole ramp.
        if values.len() < 2 {
            if self.slots[slot].parent.is_some() {
                self.bypass(slot, driven[0].1, diagnostics);
            } else {
                self.drop_edges(&[driven[0].1], diagnostics);
            }
            return;
        }

        let count = values.len();
        let mut ranked: Vec<usize> = (0..count).collect();
        ranked.sort_by(|&a, &b| values[a].position.total_cmp(&values[b].position));
        let mut rank = vec![0; count];
        for (r, &knot) in ranked.iter().enumerate() {
            rank[knot] = r;
        }

        // Mix j blends everything below knot rank j with the knot of rank j.
        // The last mix takes the ramp's place.
        let parent = self.slots[slot].parent;
        let mut mixes = vec![0; count - 1];
        let mut mix_names = vec![String::new(); count - 1];
        for j in (1..count).rev() {
            let mix_name = match j {
                1 => self.unique_name(format!("{}Mix", name)),
                _ => self.unique_name(format!("{}Mix{}", name, j)),
            };
            let mix_parent = if j == count - 1 { parent } else { Some(mixes[j]) };
            mixes[j - 1] = self.add(ShadingNode::new(mix_name.clone(), BLEND), mix_parent, Some(slot));
            mix_names[j - 1] = mix_name;
        }

        let last = &mix_names[count - 2];
        for edge in &mut self.edges {
            if edge.source == name {
                edge.source = last.clone();
            }
        }

        for knot in 0..count {
            let (mix, plug) = match rank[knot] {
                0 => (0, BLEND_LOW),
                r => (r - 1, BLEND_HIGH),
            };
            match driven.iter().find(|&&(k, _)| k == knot) {
                Some(&(_, edge)) => {
                    let source = self.edges[edge].source.clone();
                    self.adopt(&source, slot, mixes[mix]);
                    self.edges[edge].target = mix_names[mix].clone();
                    self.edges[edge].input = plug.to_string();
                }
                None => {
                    let color = knot_color(&values[knot]);
                    self.slots[mixes[mix]]
                        .node
                        .to_mut()
                        .attributes
                        .insert(plug.to_string(), Value::Vec3(color));
                }
            }
        }

        for j in 2..count {
            self.edges.push(Connection {
                source: mix_names[j - 2].clone(),
                output: BLEND_OUTPUT.to_string(),
                target: mix_names[j - 1].clone(),
                input: BLEND_LOW.to_string(),
            });
        }

        // Weight j is 1 from the knot of rank j on.
        let weights = |j: usize| {
            Value::Ramp(
                values
                    .iter()
                    .zip(&rank)
                    .map(|(knot, &r)| RampKnot::scalar(knot.position, if r >= j { 1.0 } else { 0.0 }))
                    .collect(),
            )
        };

        let shared: Vec<Connection> = self.incoming(&name).into_iter().map(|i| self.edges[i].clone()).collect();
        for j in 2..count {
            let weight_name = self.unique_name(format!("{}Weight{}", name, j));
            let mut weight = self.slots[slot].node.as_ref().clone();
            weight.name = weight_name.clone();
            weight.node_type = float_ramp.to_string();
            weight.connections.clear();
            weight.position = None;
            weight.attributes.insert(knots.to_string(), weights(j));
            self.add(weight, Some(mixes[j - 1]), None);

            for edge in &shared {
                self.edges.push(Connection {
                    target: weight_name.clone(),
                    ..edge.clone()
                });
            }
            self.edges.push(Connection {
                source: weight_name,
                output: FLOAT_RAMP_OUTPUT.to_string(),
                target: mix_names[j - 1].clone(),
                input: BLEND_WEIGHT.to_string(),
            });
        }

        let ramp = self.slots[slot].node.to_mut();
        ramp.node_type = float_ramp.to_string();
        ramp.attributes.insert(knots.to_string(), weights(1));
        self.slots[slot].parent = Some(mixes[0]);
        self.edges.push(Connection {
            source: name.clone(),
            output: FLOAT_RAMP_OUTPUT.to_string(),
            target: mix_names[0].clone(),
            input: BLEND_WEIGHT.to_string(),
        });

        debug!(ramp = %name, knots = count, driven = driven.len(), "split ramp into mixes");
    }

    /// Replace a ramp by the node driving its only knot.
    fn bypass(&mut self, slot: usize, edge: usize, diagnostics: &mut Diagnostics) {
        let name = self.name(slot);
        let Some(knot) = self.take_edges(&[edge]).pop() else {
            return;
        };
        let rest = self.incoming(&name);
        self.drop_edges(&rest, diagnostics);

        for edge in &mut self.edges {
            if edge.source == name {
                edge.source = knot.source.clone();
            }
        }
        self.remove(slot);

        debug!(ramp = %name, source = %knot.source, "bypassed single knot ramp");
    }

    fn connector_ramp(&mut self, slot: usize, rule: RampConnector, diagnostics: &mut Diagnostics) {
        let name = self.name(slot);
        let values = ramp_knots(&self.slots[slot].node, rule.knots);
        let driven = self.knot_edges(&name, &[rule.knots, rule.input], values.len(), diagnostics);
        if driven.is_empty() {
            return;
        }

        let connector_name = self.unique_name(format!("{}Connector", name));
        let connector = self.add(ShadingNode::new(connector_name.clone(), rule.connector), Some(slot), None);

        let mut edge_indices: Vec<usize> = driven.iter().map(|&(_, edge)| edge).collect();
        edge_indices.sort_unstable();
        let taken = self.take_edges(&edge_indices);

        for (knot, value) in values.iter().enumerate() {
            let port = format!("i{}", knot);
            let driving = driven
                .iter()
                .find(|&&(k, _)| k == knot)
                .and_then(|&(_, edge)| edge_indices.iter().position(|&e| e == edge));

            match driving {
                Some(position) => {
                    let mut connection = taken[position].clone();
                    self.adopt(&connection.source, slot, connector);
                    connection.target = connector_name.clone();
                    connection.input = port;
                    self.edges.push(connection);
                }
                None => {
                    let fill_name = self.unique_name(format!("{}Knot{}", name, knot));
                    let fill = ShadingNode::new(fill_name.clone(), rule.fill).attr(rule.fill_input, knot_color(value));
                    self.add(fill, Some(connector), None);
                    self.edges.push(Connection {
                        source: fill_name,
                        output: rule.fill_output.to_string(),
                        target: connector_name.clone(),
                        input: port,
                    });
                }
            }
        }

        self.edges.push(Connection {
            source: connector_name.clone(),
            output: CONNECTOR_OUTPUT.to_string(),
            target: name.clone(),
            input: rule.input.to_string(),
        });

        debug!(ramp = %name, connector = %connector_name, knots = values.len(), "gathered ramp knots");
    }

    fn sampler(&mut self, slot: usize, facing_ratio: &str, flipped_normal: &str, diagnostics: &mut Diagnostics) {
        let name = self.name(slot);
        let outgoing: Vec<usize> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.source == name)
            .map(|(i, _)| i)
            .collect();

        let mut utilities: Vec<(&str, String)> = Vec::new();
        let mut unsupported = self.incoming(&name);
        for edge in outgoing {
            let output = match self.edges[edge].output.as_str() {
                FACING_RATIO => FACING_RATIO,
                FLIPPED_NORMAL => FLIPPED_NORMAL,
                _ => {
                    unsupported.push(edge);
                    continue;
                }
            };

            let utility = match utilities.iter().find(|(o, _)| *o == output) {
                Some((_, utility)) => utility.clone(),
                None => {
                    let utility = self.unique_name(output.to_string());
                    let node = match output {
                        FACING_RATIO => ShadingNode::new(utility.clone(), facing_ratio),
                        _ => ShadingNode::new(utility.clone(), flipped_normal)
                            .attr("front", [1.0, 1.0, 1.0])
                            .attr("back", [0.0, 0.0, 0.0]),
                    };
                    let parent = self.find(&self.edges[edge].target);
                    self.add(node, parent, Some(slot));
                    utilities.push((output, utility.clone()));
                    utility
                }
            };
            self.edges[edge].source = utility;
        }

        unsupported.sort_unstable();
        self.drop_edges(&unsupported, diagnostics);
        self.remove(slot);

        debug!(sampler = %name, utilities = utilities.len(), "split sampler outputs");
    }

    fn normal_bump(&mut self, slot: usize, transform: &str) {
        let Some(interp) = self.slots[slot].node.attribute(BUMP_INTERP).map(|v| v.as_i64()) else {
            return;
        };

        let node = self.slots[slot].node.to_mut();
        node.attributes.shift_remove(BUMP_INTERP);
        if interp == Some(TANGENT_NORMAL) {
            node.node_type = transform.to_string();
            for (attribute, value) in TANGENT_TO_WORLD {
                node.attributes.insert(attribute.to_string(), value);
            }
            debug!(node = %node.name, "tangent normal bump");
        }
    }

    fn single_input(&mut self, slot: usize, input: &str, diagnostics: &mut Diagnostics) {
        let name = self.name(slot);
        let others: Vec<usize> = self
            .incoming(&name)
            .into_iter()
            .filter(|&i| {
                let plug = &self.edges[i].input;
                !(plug == input || plug.strip_prefix(input).is_some_and(|rest| rest.starts_with(|c| c == '.' || c == '[')))
            })
            .collect();
        self.drop_edges(&others, diagnostics);
    }

    /// Give a shading group its surface shader's name.
    ///
    /// The shader becomes `<shader>_out`. A shader already adopted by an
    /// earlier group is left alone.
    fn material(&mut self, slot: usize, rule: &MaterialRule, claimed: &mut FxHashSet<usize>) {
        let name = self.name(slot);
        let surface = rule
            .surface
            .iter()
            .find_map(|input| self.edges.iter().find(|e| e.target == name && e.input == *input));
        let Some(mut shader) = surface.map(|e| e.source.clone()) else {
            return;
        };

        let mut visited = FxHashSet::default();
        let shader_slot = loop {
            let Some(found) = self.find(&shader) else {
                return;
            };
            let node_type = self.slots[found].node.node_type.as_str();
            let next = rule
                .passthrough
                .iter()
                .find(|(passthrough, _)| *passthrough == node_type)
                .and_then(|(_, via)| self.edges.iter().find(|e| e.target == shader && e.input == *via))
                .map(|e| e.source.clone());

            match next {
                Some(source) if visited.insert(shader.clone()) => shader = source,
                _ => break found,
            }
        };

        if shader_slot == slot || !claimed.insert(shader_slot) {
            return;
        }

        let shader_name = self.name(shader_slot);
        let renamed = self.unique_name(format!("{}_out", shader_name));
        self.rename(shader_slot, renamed.clone());
        self.rename(slot, shader_name.clone());

        if let Some((from, to)) = rule.bump {
            if let Some(edge) = self.edges.iter_mut().find(|e| e.target == renamed && e.input == from) {
                edge.target = shader_name.clone();
                edge.input = to.to_string();
            }
        }

        debug!(group = %name, material = %shader_name, shader = %renamed, "adopted shader name");
    }

    fn into_discovery(self) -> Discovery<'s> {
        let count = self.slots.len();
        let mut parents = vec![None; count];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut roots = Vec::new();
        for &slot in &self.order {
            match self.slots[slot].parent.filter(|&p| !self.slots[p].removed) {
                Some(parent) => {
                    parents[slot] = Some(parent);
                    children[parent].push(slot);
                }
                None => roots.push(slot),
            }
        }

        let mut sequence = Vec::with_capacity(self.order.len());
        let mut depth = vec![0; count];
        let mut stack: Vec<usize> = roots.into_iter().rev().collect();
        while let Some(slot) = stack.pop() {
            sequence.push(slot);
            for &child in children[slot].iter().rev() {
                depth[child] = depth[slot] + 1;
                stack.push(child);
            }
        }

        let mut position = vec![None; count];
        for (index, &slot) in sequence.iter().enumerate() {
            position[slot] = Some(index);
        }

        let mut slots: Vec<Option<Slot<'s>>> = self.slots.into_iter().map(Some).collect();
        let nodes = sequence
            .iter()
            .filter_map(|&slot| {
                let taken = slots[slot].take()?;
                let parent = parents[slot].and_then(|p| position[p]);
                Some(Discovered::new(taken.node, parent, depth[slot]))
            })
            .collect();

        Discovery::from_parts(nodes, self.edges, self.diagnostics)
    }
}

/// Split `base[i]<rest>` into `i` and `rest`.
fn array_index<'p>(plug: &'p str, base: &str) -> Option<(usize, &'p str)> {
    let (index, rest) = plug.strip_prefix(base)?.strip_prefix('[')?.split_once(']')?;
    Some((index.parse().ok()?, rest))
}

/// `None` for plugs outside the knot lists, `Some(None)` for knot plugs
/// other than a knot colour.
fn knot_plug(plug: &str, bases: &[&str]) -> Option<Option<usize>> {
    let (knot, rest) = bases.iter().find_map(|base| array_index(plug, base))?;
    let color = rest.is_empty() || rest.to_ascii_lowercase().ends_with("color");
    Some(color.then_some(knot))
}

fn ramp_knots(node: &ShadingNode, attribute: &str) -> Vec<RampKnot> {
    match node.attribute(attribute) {
        Some(Value::Ramp(knots)) => knots.clone(),
        _ => Vec::new(),
    }
}

fn knot_color(knot: &RampKnot) -> [f64; 3] {
    match knot.value {
        KnotValue::Scalar(v) => [v; 3],
        KnotValue::Vec3(c) => c,
    }
}
