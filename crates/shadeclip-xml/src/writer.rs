//! Serialize a [`Document`] to interchange XML.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{DocConnection, DocNode, Document, Knot, ParamValue, Parameter};
use crate::{Error, Result};

/// Root element tag.
pub const ROOT_TAG: &str = "shadeclip";

impl Document {
    /// Convert to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write XML to a writer.
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        emit(&mut xml_writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let version = self.table_version.to_string();
        let mut root = BytesStart::new(ROOT_TAG);
        root.push_attribute(("group", self.group.as_str()));
        root.push_attribute(("renderer", self.renderer.as_str()));
        root.push_attribute(("tableVersion", version.as_str()));
        emit(&mut xml_writer, Event::Start(root))?;

        for node in &self.nodes {
            write_node(&mut xml_writer, node)?;
        }

        for placeholder in &self.placeholders {
            emit(&mut xml_writer, Event::Comment(BytesText::from_escaped(placeholder.comment())))?;
        }

        if !self.connections.is_empty() {
            emit(&mut xml_writer, Event::Start(BytesStart::new("connections")))?;
            for connection in &self.connections {
                write_connection(&mut xml_writer, connection)?;
            }
            emit(&mut xml_writer, Event::End(BytesEnd::new("connections")))?;
        }

        emit(&mut xml_writer, Event::End(BytesEnd::new(ROOT_TAG)))?;
        xml_writer.get_mut().write_all(b"\n")?;

        Ok(())
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| Error::Xml(e.to_string()))
}

/// Format a coordinate or colour hint without trailing zeros.
fn number(v: f64) -> String {
    // Avoid writing "-0".
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &DocNode) -> Result<()> {
    let mut elem = BytesStart::new("node");
    elem.push_attribute(("id", node.id.as_str()));
    elem.push_attribute(("name", node.name.as_str()));
    elem.push_attribute(("type", node.node_type.as_str()));
    elem.push_attribute(("class", node.class.as_str()));

    if let Some([x, y]) = node.position {
        elem.push_attribute(("x", number(x).as_str()));
        elem.push_attribute(("y", number(y).as_str()));
    }

    if let Some([r, g, b]) = node.color {
        elem.push_attribute(("colorR", number(r).as_str()));
        elem.push_attribute(("colorG", number(g).as_str()));
        elem.push_attribute(("colorB", number(b).as_str()));
    }

    if node.parameters.is_empty() {
        return emit(writer, Event::Empty(elem));
    }

    emit(writer, Event::Start(elem))?;
    for parameter in &node.parameters {
        write_parameter(writer, parameter)?;
    }
    emit(writer, Event::End(BytesEnd::new("node")))
}

fn write_parameter<W: Write>(writer: &mut Writer<W>, parameter: &Parameter) -> Result<()> {
    let mut elem = BytesStart::new("parameter");
    elem.push_attribute(("name", parameter.name.as_str()));
    elem.push_attribute(("kind", parameter.value.kind()));

    if let Some(value) = parameter.value.as_scalar() {
        elem.push_attribute(("value", value));
        return emit(writer, Event::Empty(elem));
    }

    emit(writer, Event::Start(elem))?;
    match &parameter.value {
        ParamValue::Ramp(knots) => {
            for knot in knots {
                write_knot(writer, knot)?;
            }
        }
        other => {
            if let Some(channels) = other.channels() {
                write_channels(writer, channels)?;
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new("parameter")))
}

fn write_knot<W: Write>(writer: &mut Writer<W>, knot: &Knot) -> Result<()> {
    let mut elem = BytesStart::new("knot");
    elem.push_attribute(("position", knot.position.as_str()));
    emit(writer, Event::Start(elem))?;
    write_channels(writer, &knot.channels)?;
    emit(writer, Event::End(BytesEnd::new("knot")))
}

fn write_channels<W: Write>(writer: &mut Writer<W>, channels: &[String]) -> Result<()> {
    for (i, value) in channels.iter().enumerate() {
        let name = format!("i{}", i);
        let mut elem = BytesStart::new("channel");
        elem.push_attribute(("name", name.as_str()));
        elem.push_attribute(("value", value.as_str()));
        emit(writer, Event::Empty(elem))?;
    }
    Ok(())
}

fn write_connection<W: Write>(writer: &mut Writer<W>, connection: &DocConnection) -> Result<()> {
    let mut elem = BytesStart::new("connection");
    elem.push_attribute(("source", connection.source.as_str()));
    elem.push_attribute(("output", connection.output.as_str()));
    elem.push_attribute(("target", connection.target.as_str()));
    elem.push_attribute(("input", connection.input.as_str()));
    emit(writer, Event::Empty(elem))
}
