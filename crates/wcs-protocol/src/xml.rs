//! Owned, namespace-resolved XML element tree built on quick-xml.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use wcs_common::{WcsError, WcsResult};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An attribute with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlElement>,
    text: String,
    order: usize,
}

impl XmlElement {
    /// Namespace URI, `None` for unqualified elements.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Unprefixed tag name.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Position of this element in document order.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Direct text content, without descendant text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the element has direct text content.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Concatenated text of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Value of an unqualified attribute.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attribute_ns(None, local_name)
    }

    /// Value of an attribute in the given namespace.
    pub fn attribute_ns(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == namespace && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Child elements with the given namespace and local name, in order.
    pub fn children_named<'a, 'q>(
        &'a self,
        namespace: Option<&'q str>,
        local_name: &'q str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'q
    where
        'a: 'q,
    {
        self.children
            .iter()
            .filter(move |c| c.namespace.as_deref() == namespace && c.local_name == local_name)
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parse a document from a string.
    pub fn parse(xml: &str) -> WcsResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut builder = TreeBuilder::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => builder.open(&e)?,
                Ok(Event::Empty(e)) => {
                    builder.open(&e)?;
                    builder.close()?;
                }
                Ok(Event::End(_)) => builder.close()?,
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| WcsError::Xml(e.to_string()))?;
                    builder.text(&text);
                }
                Ok(Event::CData(c)) => {
                    let raw = c.into_inner();
                    builder.text(&String::from_utf8_lossy(&raw));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(WcsError::Xml(format!(
                        "XML parsing error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        let root = builder.finish()?;
        trace!(root = root.local_name(), elements = builder.count, "Parsed XML document");
        Ok(Self { root })
    }

    /// Wrap an already built root element.
    pub fn from_root(root: XmlElement) -> Self {
        Self { root }
    }

    /// The document element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

impl std::str::FromStr for XmlDocument {
    type Err = WcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Stack-based tree construction with per-element namespace scopes.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<XmlElement>,
    scopes: Vec<Vec<(Option<String>, String)>>,
    root: Option<XmlElement>,
    count: usize,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>) -> WcsResult<()> {
        let qname = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut declarations = Vec::new();
        let mut raw_attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| WcsError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| WcsError::Xml(e.to_string()))?
                .into_owned();

            if key == "xmlns" {
                declarations.push((None, value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declarations.push((Some(prefix.to_string()), value));
            } else {
                raw_attributes.push((key, value));
            }
        }
        self.scopes.push(declarations);

        let (prefix, local_name) = split_qname(&qname);
        let namespace = self.resolve(prefix, true)?;

        let mut attributes = Vec::with_capacity(raw_attributes.len());
        for (key, value) in raw_attributes {
            let (prefix, local) = split_qname(&key);
            attributes.push(XmlAttribute {
                namespace: self.resolve(prefix, false)?,
                local_name: local.to_string(),
                value,
            });
        }

        self.stack.push(XmlElement {
            namespace,
            local_name: local_name.to_string(),
            attributes,
            children: Vec::new(),
            text: String::new(),
            order: self.count,
        });
        self.count += 1;
        Ok(())
    }

    fn close(&mut self) -> WcsResult<()> {
        self.scopes.pop();
        let element = self
            .stack
            .pop()
            .ok_or_else(|| WcsError::Xml("Unexpected closing tag".to_string()))?;

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if self.root.is_none() => self.root = Some(element),
            None => return Err(WcsError::Xml("Multiple root elements".to_string())),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some(current) = self.stack.last_mut() {
            current.text.push_str(text);
        }
    }

    fn finish(&mut self) -> WcsResult<XmlElement> {
        if !self.stack.is_empty() {
            return Err(WcsError::Xml("Unclosed element at end of input".to_string()));
        }
        self.root
            .take()
            .ok_or_else(|| WcsError::Xml("Document has no root element".to_string()))
    }

    /// Resolve a prefix against the open scopes. Unprefixed attributes are
    /// never in a namespace; unprefixed elements take the default namespace.
    fn resolve(&self, prefix: Option<&str>, is_element: bool) -> WcsResult<Option<String>> {
        match prefix {
            None if !is_element => Ok(None),
            Some("xml") => Ok(Some(XML_NAMESPACE.to_string())),
            _ => {
                for scope in self.scopes.iter().rev() {
                    for (declared, uri) in scope.iter().rev() {
                        if declared.as_deref() == prefix {
                            return Ok(if uri.is_empty() { None } else { Some(uri.clone()) });
                        }
                    }
                }
                match prefix {
                    None => Ok(None),
                    Some(p) => Err(WcsError::Xml(format!("Undeclared namespace prefix '{}'", p))),
                }
            }
        }
    }
}

fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}
