//! Tag-name keyed registry of parsing functions.
//!
//! Each tag maps to an ordered list of functions. Dispatching a tag runs
//! every function in registration order and merges their partial results
//! (see [`wcs_common::merge`]). Extensions add fields to a tag's result by
//! registering further functions for that tag; the core parsers never need
//! to know about them.
//!
//! Registration order is merge precedence: later functions win conflicting
//! leaves. [`crate::WcsParser`] registers the core parsers first, then
//! extensions in the order they are installed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use wcs_common::{Merge, WcsError, WcsResult};

use crate::xml::XmlElement;

/// A registered parsing function.
pub type ParseFn<T> = Arc<dyn Fn(&ParseContext<'_, T>, &XmlElement) -> WcsResult<T> + Send + Sync>;

/// Wrap a function or closure as a [`ParseFn`].
pub fn parse_fn<T, F>(f: F) -> ParseFn<T>
where
    F: Fn(&ParseContext<'_, T>, &XmlElement) -> WcsResult<T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Return an exception report as `Err(WcsError::ServiceException)`
    /// instead of a parsed value.
    #[serde(default)]
    pub throw_on_exception: bool,
}

impl ParseOptions {
    pub fn throw_on_exception() -> Self {
        Self {
            throw_on_exception: true,
        }
    }
}

/// A module contributing parsing functions, e.g. a service profile.
pub trait ParserExtension<T> {
    /// Human readable name, recorded in installation order.
    fn name(&self) -> &str;

    /// Register this extension's functions.
    fn register(&self, registry: &mut ParserRegistry<T>);
}

/// Owned registry of parsing functions.
///
/// Registration takes `&mut self` and dispatch takes `&self`, so a registry
/// can never be observed half-updated. Once bootstrapped it can be shared
/// across threads behind an `Arc`.
pub struct ParserRegistry<T> {
    parsers: BTreeMap<String, Vec<ParseFn<T>>>,
    extensions: Vec<String>,
    defaults: ParseOptions,
}

impl<T> Default for ParserRegistry<T> {
    fn default() -> Self {
        Self {
            parsers: BTreeMap::new(),
            extensions: Vec::new(),
            defaults: ParseOptions::default(),
        }
    }
}

impl<T> fmt::Debug for ParserRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .parsers
            .iter()
            .map(|(tag, fns)| (tag.as_str(), fns.len()))
            .collect();
        f.debug_struct("ParserRegistry")
            .field("parsers", &counts)
            .field("extensions", &self.extensions)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl<T: Merge> ParserRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given default options.
    pub fn with_defaults(defaults: ParseOptions) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn defaults(&self) -> ParseOptions {
        self.defaults
    }

    pub fn set_defaults(&mut self, defaults: ParseOptions) {
        self.defaults = defaults;
    }

    /// Append a function to the list for `tag`. Registering the same
    /// function twice runs it twice.
    pub fn register<F>(&mut self, tag: impl Into<String>, f: F)
    where
        F: Fn(&ParseContext<'_, T>, &XmlElement) -> WcsResult<T> + Send + Sync + 'static,
    {
        self.register_fn(tag, parse_fn(f));
    }

    /// Append an already wrapped function to the list for `tag`.
    pub fn register_fn(&mut self, tag: impl Into<String>, f: ParseFn<T>) {
        let tag = tag.into();
        let fns = self.parsers.entry(tag.clone()).or_default();
        fns.push(f);
        debug!(tag = %tag, position = fns.len(), "Registered parse function");
    }

    /// Register several functions, in iteration order.
    pub fn register_all<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, ParseFn<T>)>,
        S: Into<String>,
    {
        for (tag, f) in entries {
            self.register_fn(tag, f);
        }
    }

    /// Install an extension. Its functions run after everything registered
    /// before this call.
    pub fn install<E>(&mut self, extension: &E)
    where
        E: ParserExtension<T> + ?Sized,
    {
        debug!(extension = extension.name(), "Installing parser extension");
        extension.register(self);
        self.extensions.push(extension.name().to_string());
    }

    /// Names of installed extensions, in installation order.
    pub fn installed(&self) -> &[String] {
        &self.extensions
    }

    /// Number of functions registered for `tag`.
    pub fn parsers_for(&self, tag: &str) -> usize {
        self.parsers.get(tag).map_or(0, Vec::len)
    }

    /// All tags with at least one function.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.parsers
            .iter()
            .filter(|(_, fns)| !fns.is_empty())
            .map(|(tag, _)| tag.as_str())
    }

    /// Dispatch with the registry's default options.
    pub fn dispatch(&self, tag: &str, node: &XmlElement) -> WcsResult<T> {
        self.dispatch_with(tag, node, self.defaults)
    }

    /// Run every function registered for `tag` on `node` and merge the
    /// results in registration order.
    pub fn dispatch_with(&self, tag: &str, node: &XmlElement, options: ParseOptions) -> WcsResult<T> {
        let (first, rest) = self
            .parsers
            .get(tag)
            .and_then(|fns| fns.split_first())
            .ok_or_else(|| WcsError::NoParserRegistered(tag.to_string()))?;

        trace!(tag, parsers = rest.len() + 1, "Dispatching");

        let context = ParseContext {
            registry: self,
            options,
        };

        let mut merged = first(&context, node)?;
        for f in rest {
            merged.merge(f(&context, node)?);
        }
        Ok(merged)
    }
}

/// Handed to every parsing function so nested elements can be dispatched
/// with the same registry and options.
pub struct ParseContext<'r, T> {
    registry: &'r ParserRegistry<T>,
    options: ParseOptions,
}

impl<'r, T: Merge> ParseContext<'r, T> {
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn registry(&self) -> &'r ParserRegistry<T> {
        self.registry
    }

    /// Dispatch a nested element under an explicit tag name.
    pub fn dispatch(&self, tag: &str, node: &XmlElement) -> WcsResult<T> {
        self.registry.dispatch_with(tag, node, self.options)
    }

    /// Dispatch a nested element under its own local name.
    pub fn dispatch_node(&self, node: &XmlElement) -> WcsResult<T> {
        self.dispatch(node.local_name(), node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Nested {
        x: Option<i32>,
        y: Option<i32>,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Foo {
        a: Option<i32>,
        b: Option<i32>,
        nested: Option<Nested>,
    }

    impl Merge for Nested {
        fn merge(&mut self, other: Self) {
            wcs_common::merge::merge_leaf(&mut self.x, other.x);
            wcs_common::merge::merge_leaf(&mut self.y, other.y);
        }
    }

    impl Merge for Foo {
        fn merge(&mut self, other: Self) {
            wcs_common::merge::merge_leaf(&mut self.a, other.a);
            wcs_common::merge::merge_leaf(&mut self.b, other.b);
            wcs_common::merge::merge_nested(&mut self.nested, other.nested);
        }
    }

    fn node() -> XmlDocument {
        XmlDocument::parse("<Foo/>").unwrap()
    }

    fn first_parser(_: &ParseContext<'_, Foo>, _: &XmlElement) -> WcsResult<Foo> {
        Ok(Foo {
            a: Some(1),
            nested: Some(Nested { x: Some(1), y: None }),
            ..Default::default()
        })
    }

    fn second_parser(_: &ParseContext<'_, Foo>, _: &XmlElement) -> WcsResult<Foo> {
        Ok(Foo {
            b: Some(2),
            nested: Some(Nested { x: None, y: Some(2) }),
            ..Default::default()
        })
    }

    #[test]
    fn test_unknown_tag_fails() {
        let registry = ParserRegistry::<Foo>::new();
        let doc = node();
        let err = registry.dispatch("UnknownTag", doc.root()).unwrap_err();
        assert!(matches!(err, WcsError::NoParserRegistered(tag) if tag == "UnknownTag"));
    }

    #[test]
    fn test_single_contributor_returned_unmerged() {
        let mut registry = ParserRegistry::new();
        registry.register("Foo", first_parser);
        let doc = node();

        let context = ParseContext {
            registry: &registry,
            options: ParseOptions::default(),
        };
        let expected = first_parser(&context, doc.root()).unwrap();

        let result = registry.dispatch("Foo", doc.root()).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_recursive_merge_without_field_loss() {
        let mut registry = ParserRegistry::new();
        registry.register_all([
            ("Foo", parse_fn(first_parser)),
            ("Foo", parse_fn(second_parser)),
        ]);
        let doc = node();

        let result = registry.dispatch("Foo", doc.root()).unwrap();
        assert_eq!(
            result,
            Foo {
                a: Some(1),
                b: Some(2),
                nested: Some(Nested { x: Some(1), y: Some(2) }),
            }
        );
        assert_eq!(registry.parsers_for("Foo"), 2);
    }

    #[test]
    fn test_later_registration_wins_conflicting_leaf() {
        let mut registry = ParserRegistry::new();
        registry.register("Foo", first_parser);
        registry.register("Foo", |_: &ParseContext<'_, Foo>, _: &XmlElement| {
            Ok(Foo {
                a: Some(10),
                ..Default::default()
            })
        });
        let doc = node();

        let result = registry.dispatch("Foo", doc.root()).unwrap();
        assert_eq!(result.a, Some(10));
        assert_eq!(result.nested.unwrap().x, Some(1));
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let f = parse_fn(move |_: &ParseContext<'_, Foo>, _: &XmlElement| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Foo::default())
        });

        let mut registry = ParserRegistry::new();
        registry.register_fn("Foo", Arc::clone(&f));
        registry.register_fn("Foo", f);
        let doc = node();

        registry.dispatch("Foo", doc.root()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_nested_dispatch_uses_context_options() {
        let mut registry = ParserRegistry::new();
        registry.register("Outer", |ctx: &ParseContext<'_, Foo>, node: &XmlElement| {
            let mut merged = Foo::default();
            for child in node.children() {
                merged.merge(ctx.dispatch_node(child)?);
            }
            Ok(merged)
        });
        registry.register("Inner", |ctx: &ParseContext<'_, Foo>, _: &XmlElement| {
            Ok(Foo {
                a: Some(i32::from(ctx.options().throw_on_exception)),
                ..Default::default()
            })
        });

        let doc = XmlDocument::parse("<Outer><Inner/></Outer>").unwrap();
        let result = registry
            .dispatch_with("Outer", doc.root(), ParseOptions::throw_on_exception())
            .unwrap();
        assert_eq!(result.a, Some(1));
    }

    struct Extra;

    impl ParserExtension<Foo> for Extra {
        fn name(&self) -> &str {
            "extra"
        }

        fn register(&self, registry: &mut ParserRegistry<Foo>) {
            registry.register("Foo", second_parser);
        }
    }

    #[test]
    fn test_install_records_order() {
        let mut registry = ParserRegistry::new();
        registry.register("Foo", first_parser);
        registry.install(&Extra);

        assert_eq!(registry.installed(), ["extra".to_string()]);
        assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["Foo"]);

        let doc = node();
        let result = registry.dispatch("Foo", doc.root()).unwrap();
        assert_eq!(result.b, Some(2));
    }
}
