use std::collections::BTreeMap;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid CSV response: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML response has no root element")]
    EmptyDocument,

    #[error("response is missing field: {field}")]
    MissingField { field: String },

    #[error("response is missing attribute: {attribute}")]
    MissingAttribute { attribute: String },

    #[error("response field {field} has unexpected shape (expected {expected})")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },

    #[error("response field {field} is not a valid number: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("unexpected response payload (expected {expected})")]
    UnexpectedPayload { expected: &'static str },
}

/// Generic tree built from an XML response.
///
/// Repeated sibling elements become a [`XmlNode::List`]; a single occurrence
/// stays a bare node, so repeatable elements must go through
/// [`XmlNode::as_sequence`]. An empty element becomes an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Text(String),
    Map(XmlMap),
    List(Vec<XmlNode>),
}

/// Element with attributes and/or child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlMap {
    attributes: BTreeMap<String, String>,
    children: Vec<(String, XmlNode)>,
    text: Option<String>,
}

impl XmlMap {
    /// The element's attributes (the `@attributes` part of the tree).
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &XmlNode)> {
        self.children.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Character data mixed in with attributes or children, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl XmlNode {
    pub fn as_map(&self) -> Option<&XmlMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrowing form of [`coerce_to_sequence`].
    pub fn as_sequence(&self) -> &[XmlNode] {
        match self {
            Self::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Borrowing form of [`coerce_empty_to_null`].
    pub fn non_empty(&self) -> Option<&XmlNode> {
        match self {
            Self::List(items) if items.is_empty() => None,
            other => Some(other),
        }
    }

    /// Scalar content; an empty element reads as `""`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(items) if items.is_empty() => Some(""),
            Self::Map(map) => map.text(),
            Self::List(_) => None,
        }
    }

    fn map_for(&self, field: &str) -> Result<&XmlMap, DecodeError> {
        self.as_map().ok_or_else(|| DecodeError::UnexpectedShape {
            field: field.to_owned(),
            expected: "element with children or attributes",
        })
    }

    /// Required child element.
    pub fn field(&self, name: &str) -> Result<&XmlNode, DecodeError> {
        self.map_for(name)?
            .child(name)
            .ok_or_else(|| DecodeError::MissingField {
                field: name.to_owned(),
            })
    }

    /// Required child element read as text.
    pub fn text(&self, name: &str) -> Result<String, DecodeError> {
        let node = self.field(name)?;
        node.as_text()
            .map(str::to_owned)
            .ok_or_else(|| DecodeError::UnexpectedShape {
                field: name.to_owned(),
                expected: "text",
            })
    }

    /// Optional child element read as text; absent and empty elements both
    /// read as `None`.
    pub fn optional_text(&self, name: &str) -> Result<Option<String>, DecodeError> {
        match self.optional_field(name)? {
            None => Ok(None),
            Some(node) => node
                .as_text()
                .map(|text| Some(text.to_owned()))
                .ok_or_else(|| DecodeError::UnexpectedShape {
                    field: name.to_owned(),
                    expected: "text",
                }),
        }
    }

    /// Optional child element; absent and empty elements both read as `None`.
    pub fn optional_field(&self, name: &str) -> Result<Option<&XmlNode>, DecodeError> {
        Ok(self
            .map_for(name)?
            .child(name)
            .and_then(XmlNode::non_empty))
    }

    /// Required child element parsed as a number.
    pub fn number<T: FromStr>(&self, name: &str) -> Result<T, DecodeError> {
        let value = self.text(name)?;
        value
            .trim()
            .parse::<T>()
            .map_err(|_| DecodeError::InvalidNumber {
                field: name.to_owned(),
                value,
            })
    }

    /// Required attribute of this element.
    pub fn attr(&self, name: &str) -> Result<String, DecodeError> {
        self.map_for(name)?
            .attribute(name)
            .map(str::to_owned)
            .ok_or_else(|| DecodeError::MissingAttribute {
                attribute: name.to_owned(),
            })
    }

    /// Required repeatable child element, one entry per occurrence.
    pub fn items(&self, name: &str) -> Result<&[XmlNode], DecodeError> {
        Ok(self.field(name)?.as_sequence())
    }

    /// Repeatable child element that may be absent; an empty parent has no
    /// items either.
    pub fn optional_items(&self, name: &str) -> Result<&[XmlNode], DecodeError> {
        if self.non_empty().is_none() {
            return Ok(&[]);
        }
        Ok(self
            .optional_field(name)?
            .map(XmlNode::as_sequence)
            .unwrap_or(&[]))
    }
}

/// Wrap a single node into a one-element list; lists pass through unchanged.
pub fn coerce_to_sequence(node: XmlNode) -> XmlNode {
    match node {
        XmlNode::List(items) => XmlNode::List(items),
        other => XmlNode::List(vec![other]),
    }
}

/// Map an empty list (an empty element) to `None`; everything else, including
/// empty text, passes through unchanged.
pub fn coerce_empty_to_null(node: XmlNode) -> Option<XmlNode> {
    match node {
        XmlNode::List(items) if items.is_empty() => None,
        other => Some(other),
    }
}

pub fn is_xml(raw: &str) -> bool {
    raw.starts_with('<')
}

/// Loose `<code>,<message>` check: exactly two comma-separated fields, the
/// first an integer.
pub fn is_plain_error(raw: &str) -> bool {
    let mut fields = raw.split(',');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(code), Some(_), None) => code.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

#[derive(Default)]
struct ElementBuilder {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<(String, Vec<XmlNode>)>,
    text: String,
}

impl ElementBuilder {
    fn start(element: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let mut attributes = BTreeMap::new();
        for attribute in element.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.insert(key, value);
        }
        Ok(Self {
            name: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    fn push_child(&mut self, name: String, node: XmlNode) {
        match self.children.iter_mut().find(|(key, _)| *key == name) {
            Some((_, nodes)) => nodes.push(node),
            None => self.children.push((name, vec![node])),
        }
    }

    /// Leaf text is kept verbatim. Around child elements, whitespace-only
    /// text is layout and is dropped.
    fn finish(self) -> (String, XmlNode) {
        let text = self.text;
        let node = if self.attributes.is_empty() && self.children.is_empty() {
            if text.is_empty() {
                XmlNode::List(Vec::new())
            } else {
                XmlNode::Text(text)
            }
        } else {
            let children = self
                .children
                .into_iter()
                .map(|(name, mut nodes)| {
                    let node = if nodes.len() == 1 {
                        nodes.remove(0)
                    } else {
                        XmlNode::List(nodes)
                    };
                    (name, node)
                })
                .collect();
            XmlNode::Map(XmlMap {
                attributes: self.attributes,
                children,
                text: (!text.trim().is_empty()).then_some(text),
            })
        };
        (self.name, node)
    }
}

/// Parse an XML document into the tree of its root element.
pub fn xml_to_tree(raw: &str) -> Result<XmlNode, DecodeError> {
    let mut reader = Reader::from_str(raw);
    let mut stack: Vec<ElementBuilder> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => stack.push(ElementBuilder::start(&element)?),
            Event::Empty(element) => {
                let (name, node) = ElementBuilder::start(&element)?.finish();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, node),
                    None => root = root.or(Some(node)),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let Some(current) = stack.pop() else {
                    continue;
                };
                let (name, node) = current.finish();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, node),
                    None => root = root.or(Some(node)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or(DecodeError::EmptyDocument)
}

/// Parse a CSV report: the first line is the header, every following
/// non-blank line becomes one record keyed by header name.
pub fn parse_csv(raw: &str) -> Result<Vec<BTreeMap<String, String>>, DecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row = headers
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.to_owned(), record.get(idx).unwrap_or("").to_owned()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
