//! Namespace-aware node access.
//!
//! A small subset of XPath sufficient for OWS documents: child element
//! steps (`prefix:Local`), optionally terminated by `text()` or an attribute
//! selector (`@name`, `@prefix:name`). Alternation between grammar variants
//! is expressed as an ordered list of candidate paths.

use std::collections::BTreeMap;

use wcs_common::{WcsError, WcsResult};

use crate::xml::XmlElement;

/// Immutable mapping from namespace prefix to namespace URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    prefixes: BTreeMap<String, String>,
}

impl NamespaceMap {
    pub fn new<I, P, U>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        Self {
            prefixes: entries
                .into_iter()
                .map(|(p, u)| (p.into(), u.into()))
                .collect(),
        }
    }

    /// Derive a new map with additional (or overriding) prefixes.
    pub fn extend<I, P, U>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        let mut prefixes = self.prefixes.clone();
        prefixes.extend(entries.into_iter().map(|(p, u)| (p.into(), u.into())));
        Self { prefixes }
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Resolve an optional prefix. Unprefixed names are in no namespace.
    fn resolve(&self, prefix: Option<&str>) -> WcsResult<Option<&str>> {
        match prefix {
            None => Ok(None),
            Some(p) => self
                .get(p)
                .map(Some)
                .ok_or_else(|| WcsError::UnknownNamespacePrefix(p.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    prefix: Option<String>,
    local_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Node,
    Text,
    Attribute(Step),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LocationPath {
    steps: Vec<Step>,
    target: Target,
}

impl LocationPath {
    fn compile(path: &str) -> Self {
        let mut steps = Vec::new();
        let mut target = Target::Node;

        for part in path.split('/').map(str::trim).filter(|p| !p.is_empty()) {
            if part == "text()" {
                target = Target::Text;
            } else if let Some(attr) = part.strip_prefix('@') {
                target = Target::Attribute(Step::parse(attr));
            } else {
                steps.push(Step::parse(part));
            }
        }

        Self { steps, target }
    }

    fn is_text(&self) -> bool {
        !matches!(self.target, Target::Node)
    }
}

impl Step {
    fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix.to_string()),
                local_name: local.to_string(),
            },
            None => Self {
                prefix: None,
                local_name: name.to_string(),
            },
        }
    }
}

/// An ordered list of candidate location paths.
///
/// Matches of all candidates are returned in document order, so the first
/// match wins regardless of which candidate produced it. Candidates must
/// agree on their target: either all select text (`text()` or `@attr`) or
/// all select elements. Evaluating a mixed list fails with `InvalidPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPath {
    candidates: Vec<LocationPath>,
}

impl XPath {
    pub fn new(path: &str) -> Self {
        Self {
            candidates: vec![LocationPath::compile(path)],
        }
    }

    pub fn any_of<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            candidates: paths
                .into_iter()
                .map(|p| LocationPath::compile(p.as_ref()))
                .collect(),
        }
    }

    /// Add an alternative candidate.
    pub fn or(mut self, path: &str) -> Self {
        self.candidates.push(LocationPath::compile(path));
        self
    }

    /// Whether the path selects text (a `text()` or attribute target)
    /// rather than element nodes. Only meaningful for a uniform path.
    pub fn is_text(&self) -> bool {
        !self.candidates.is_empty() && self.candidates.iter().all(LocationPath::is_text)
    }

    fn check_uniform(&self) -> WcsResult<()> {
        let text = self.candidates.iter().filter(|c| c.is_text()).count();
        if text == 0 || text == self.candidates.len() {
            Ok(())
        } else {
            Err(WcsError::InvalidPath(
                "alternatives mix text and element targets".to_string(),
            ))
        }
    }
}

impl From<&str> for XPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for XPath {
    fn from(path: String) -> Self {
        Self::new(&path)
    }
}

impl<const N: usize> From<[&str; N]> for XPath {
    fn from(paths: [&str; N]) -> Self {
        Self::any_of(paths)
    }
}

impl From<&[&str]> for XPath {
    fn from(paths: &[&str]) -> Self {
        Self::any_of(paths)
    }
}

/// A single lookup result.
#[derive(Debug, Clone, PartialEq)]
pub enum Match<'a> {
    Text(String),
    Node(&'a XmlElement),
}

impl<'a> Match<'a> {
    /// String value: the text itself, or the element's text content.
    pub fn into_text(self) -> String {
        match self {
            Match::Text(s) => s,
            Match::Node(n) => n.text_content(),
        }
    }

    pub fn as_node(&self) -> Option<&'a XmlElement> {
        match self {
            Match::Node(n) => Some(n),
            Match::Text(_) => None,
        }
    }
}

/// Path lookups bound to a namespace map.
#[derive(Debug, Clone, Copy)]
pub struct NodeAccess<'n> {
    namespaces: &'n NamespaceMap,
}

impl<'n> NodeAccess<'n> {
    pub fn new(namespaces: &'n NamespaceMap) -> Self {
        Self { namespaces }
    }

    pub fn namespaces(&self) -> &'n NamespaceMap {
        self.namespaces
    }

    /// First match of `path`.
    ///
    /// Text-valued paths always yield a `Match::Text`, empty when nothing
    /// matched. Node paths yield `None` when nothing matched.
    pub fn single<'a>(
        &self,
        node: &'a XmlElement,
        path: impl Into<XPath>,
    ) -> WcsResult<Option<Match<'a>>> {
        let path = path.into();
        let first = self.evaluate(node, &path)?.into_iter().next();
        if path.is_text() {
            Ok(Some(first.unwrap_or_else(|| Match::Text(String::new()))))
        } else {
            Ok(first)
        }
    }

    /// All matches of `path`, in document order. Never fails for lack of
    /// matches; the result is simply empty.
    pub fn list<'a>(&self, node: &'a XmlElement, path: impl Into<XPath>) -> WcsResult<Vec<Match<'a>>> {
        self.evaluate(node, &path.into())
    }

    /// String value of the first match, empty when unmatched.
    pub fn text(&self, node: &XmlElement, path: impl Into<XPath>) -> WcsResult<String> {
        Ok(self
            .single(node, path)?
            .map(Match::into_text)
            .unwrap_or_default())
    }

    /// First matching element.
    pub fn node<'a>(
        &self,
        node: &'a XmlElement,
        path: impl Into<XPath>,
    ) -> WcsResult<Option<&'a XmlElement>> {
        Ok(self.single(node, path)?.and_then(|m| m.as_node()))
    }

    /// String values of all matches.
    pub fn texts(&self, node: &XmlElement, path: impl Into<XPath>) -> WcsResult<Vec<String>> {
        Ok(self
            .list(node, path)?
            .into_iter()
            .map(Match::into_text)
            .collect())
    }

    /// All matching elements.
    pub fn nodes<'a>(
        &self,
        node: &'a XmlElement,
        path: impl Into<XPath>,
    ) -> WcsResult<Vec<&'a XmlElement>> {
        Ok(self
            .list(node, path)?
            .iter()
            .filter_map(Match::as_node)
            .collect())
    }

    fn evaluate<'a>(&self, node: &'a XmlElement, path: &XPath) -> WcsResult<Vec<Match<'a>>> {
        path.check_uniform()?;
        let mut found: Vec<(usize, Match<'a>)> = Vec::new();
        for candidate in &path.candidates {
            self.select(node, candidate, &mut found)?;
        }
        if path.candidates.len() > 1 {
            found.sort_by_key(|(order, _)| *order);
            found.dedup_by_key(|(order, _)| *order);
        }
        Ok(found.into_iter().map(|(_, m)| m).collect())
    }

    fn select<'a>(
        &self,
        node: &'a XmlElement,
        path: &LocationPath,
        out: &mut Vec<(usize, Match<'a>)>,
    ) -> WcsResult<()> {
        let mut current = vec![node];
        for step in &path.steps {
            let namespace = self.namespaces.resolve(step.prefix.as_deref())?;
            current = current
                .into_iter()
                .flat_map(|n| n.children().iter())
                .filter(|c| c.namespace() == namespace && c.local_name() == step.local_name)
                .collect();
        }

        match &path.target {
            Target::Node => {
                out.extend(current.into_iter().map(|n| (n.order(), Match::Node(n))));
            }
            Target::Text => {
                out.extend(
                    current
                        .into_iter()
                        .filter(|n| n.has_text())
                        .map(|n| (n.order(), Match::Text(n.text().to_string()))),
                );
            }
            Target::Attribute(attr) => {
                let namespace = self.namespaces.resolve(attr.prefix.as_deref())?;
                out.extend(current.into_iter().filter_map(|n| {
                    n.attribute_ns(namespace, &attr.local_name)
                        .map(|v| (n.order(), Match::Text(v.to_string())))
                }));
            }
        }
        Ok(())
    }
}
