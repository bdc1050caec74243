//! Parse interchange XML back into a [`Document`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::document::{DocConnection, DocNode, Document, Knot, ParamValue, Parameter, Placeholder};
use crate::writer::ROOT_TAG;
use crate::{Error, Result};

/// A generic element read from the XML stream.
#[derive(Debug, Default)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    comments: Vec<String>,
}

impl Element {
    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            tag,
            attributes,
            ..Self::default()
        })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, element: &'static str, attribute: &'static str) -> Result<String> {
        self.get(attribute)
            .map(str::to_string)
            .ok_or(Error::MissingAttribute { element, attribute })
    }

    fn number(&self, attribute: &'static str) -> Result<Option<f64>> {
        match self.get(attribute) {
            None => Ok(None),
            Some(text) => text.parse().map(Some).map_err(|_| Error::InvalidNumber {
                attribute,
                value: text.to_string(),
            }),
        }
    }

    fn unexpected(&self, child: &Element) -> Error {
        Error::UnexpectedElement {
            parent: self.tag.clone(),
            found: child.tag.clone(),
        }
    }
}

/// Parse XML text into a [`Document`].
pub fn parse_document(xml: &str) -> Result<Document> {
    let root = parse_tree(xml)?;
    if root.tag != ROOT_TAG {
        return Err(Error::Xml(format!("expected <{}> root, found <{}>", ROOT_TAG, root.tag)));
    }

    let table_version = match root.get("tableVersion") {
        Some(text) => text.parse().map_err(|_| Error::InvalidNumber {
            attribute: "tableVersion",
            value: text.to_string(),
        })?,
        None => 0,
    };

    let mut doc = Document::new(
        root.require(ROOT_TAG, "group")?,
        root.require(ROOT_TAG, "renderer")?,
        table_version,
    );

    doc.placeholders = root
        .comments
        .iter()
        .filter_map(|c| Placeholder::from_comment(c))
        .collect();

    for child in &root.children {
        match child.tag.as_str() {
            "node" => doc.nodes.push(read_node(child)?),
            "connections" => {
                for connection in &child.children {
                    if connection.tag != "connection" {
                        return Err(child.unexpected(connection));
                    }
                    doc.connections.push(read_connection(connection)?);
                }
            }
            _ => return Err(root.unexpected(child)),
        }
    }

    Ok(doc)
}

fn read_node(elem: &Element) -> Result<DocNode> {
    let position = match (elem.number("x")?, elem.number("y")?) {
        (Some(x), Some(y)) => Some([x, y]),
        _ => None,
    };
    let color = match (elem.number("colorR")?, elem.number("colorG")?, elem.number("colorB")?) {
        (Some(r), Some(g), Some(b)) => Some([r, g, b]),
        _ => None,
    };

    let mut parameters = Vec::with_capacity(elem.children.len());
    for child in &elem.children {
        if child.tag != "parameter" {
            return Err(elem.unexpected(child));
        }
        parameters.push(read_parameter(child)?);
    }

    Ok(DocNode {
        id: elem.require("node", "id")?,
        name: elem.require("node", "name")?,
        node_type: elem.require("node", "type")?,
        class: elem.get("class").unwrap_or_default().to_string(),
        position,
        color,
        parameters,
    })
}

fn read_parameter(elem: &Element) -> Result<Parameter> {
    let name = elem.require("parameter", "name")?;
    let kind = elem.require("parameter", "kind")?;

    let value = match kind.as_str() {
        "float" => ParamValue::Float(elem.require("parameter", "value")?),
        "int" => ParamValue::Int(elem.require("parameter", "value")?),
        "enum" => ParamValue::Enum(elem.require("parameter", "value")?),
        "string" => ParamValue::String(elem.require("parameter", "value")?),
        "color3" => ParamValue::Color3(read_triple(elem)?),
        "vector3" => ParamValue::Vector3(read_triple(elem)?),
        "floatArray" => ParamValue::FloatArray(read_channels(elem)?),
        "ramp" => {
            let mut knots = Vec::with_capacity(elem.children.len());
            for child in &elem.children {
                if child.tag != "knot" {
                    return Err(elem.unexpected(child));
                }
                knots.push(Knot {
                    position: child.require("knot", "position")?,
                    channels: read_channels(child)?,
                });
            }
            ParamValue::Ramp(knots)
        }
        _ => return Err(Error::UnknownKind(kind)),
    };

    Ok(Parameter { name, value })
}

fn read_channels(elem: &Element) -> Result<Vec<String>> {
    elem.children
        .iter()
        .map(|child| {
            if child.tag != "channel" {
                return Err(elem.unexpected(child));
            }
            child.require("channel", "value")
        })
        .collect()
}

fn read_triple(elem: &Element) -> Result<[String; 3]> {
    let channels = read_channels(elem)?;
    <[String; 3]>::try_from(channels)
        .map_err(|v| Error::Xml(format!("expected 3 channels, found {}", v.len())))
}

fn read_connection(elem: &Element) -> Result<DocConnection> {
    Ok(DocConnection {
        source: elem.require("connection", "source")?,
        output: elem.require("connection", "output")?,
        target: elem.require("connection", "target")?,
        input: elem.require("connection", "input")?,
    })
}

/// Parse XML text into an element tree.
fn parse_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(Element::from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let elem = Element::from_start(&e)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(elem);
                } else {
                    root = Some(elem);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(elem) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(elem);
                    } else {
                        root = Some(elem);
                    }
                }
            }
            Ok(Event::Comment(e)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.comments.push(String::from_utf8_lossy(&e).into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::Xml(format!("XML parse error: {}", e))),
        }
    }

    root.ok_or_else(|| Error::Xml("No root element found in XML".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<shadeclip group="SG1" renderer="arnold" tableVersion="1">
  <node id="SG1" name="SG1" type="networkMaterial" class="NetworkMaterial" x="0" y="0"/>
  <node id="ramp1" name="ramp1" type="ramp" class="ArnoldShadingNode" x="0" y="100" colorR="0.5" colorG="0.5" colorB="0.5">
    <parameter name="type" kind="enum" value="u"/>
    <parameter name="scale" kind="vector3">
      <channel name="i0" value="1.000000"/>
      <channel name="i1" value="2.000000"/>
      <channel name="i2" value="3.000000"/>
    </parameter>
    <parameter name="ramp" kind="ramp">
      <knot position="0.250000"><channel name="i0" value="1.000000"/></knot>
    </parameter>
  </node>
  <!-- unsupported node 'cam1' of type 'camera' -->
  <connections>
    <connection source="ramp1" output="out.r" target="SG1" input="arnoldSurface"/>
  </connections>
</shadeclip>
"#;

    #[test]
    fn test_parse_document() {
        let doc = parse_document(SAMPLE).unwrap();
        assert_eq!(doc.group, "SG1");
        assert_eq!(doc.renderer, "arnold");
        assert_eq!(doc.table_version, 1);
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.placeholders.len(), 1);
        assert_eq!(doc.placeholders[0].node_type, "camera");
        assert_eq!(doc.connections[0].output, "out.r");
        assert!(doc.validate().is_ok());

        let ramp = doc.node("ramp1").unwrap();
        assert_eq!(ramp.position, Some([0.0, 100.0]));
        assert_eq!(ramp.color, Some([0.5, 0.5, 0.5]));
        assert_eq!(ramp.parameter("type"), Some(&ParamValue::Enum("u".into())));
        assert_eq!(
            ramp.parameter("scale"),
            Some(&ParamValue::Vector3(["1.000000".into(), "2.000000".into(), "3.000000".into()]))
        );
        match ramp.parameter("ramp") {
            Some(ParamValue::Ramp(knots)) => {
                assert_eq!(knots.len(), 1);
                assert_eq!(knots[0].position, "0.250000");
            }
            other => panic!("unexpected ramp value: {:?}", other),
        }
    }

    #[test]
    fn test_write_then_parse() {
        let doc = parse_document(SAMPLE).unwrap();
        let xml = doc.to_xml_string().unwrap();
        assert_eq!(parse_document(&xml).unwrap(), doc);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_document("").is_err());
        assert!(matches!(
            parse_document(r#"<other group="g" renderer="r"/>"#),
            Err(Error::Xml(_))
        ));
        assert!(matches!(
            parse_document(r#"<shadeclip renderer="r"/>"#),
            Err(Error::MissingAttribute { attribute: "group", .. })
        ));
        assert!(matches!(
            parse_document(
                r#"<shadeclip group="g" renderer="r"><node id="a" name="a" type="t"><parameter name="p" kind="matrix" value="1"/></node></shadeclip>"#
            ),
            Err(Error::UnknownKind(kind)) if kind == "matrix"
        ));
        assert!(matches!(
            parse_document(r#"<shadeclip group="g" renderer="r"><node id="a" name="a" type="t" x="left" y="0"/></shadeclip>"#),
            Err(Error::InvalidNumber { attribute: "x", .. })
        ));
    }
}
