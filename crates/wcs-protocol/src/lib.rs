//! OGC Web Coverage Service 2.0 client protocol.
//!
//! Supports:
//! - KVP request URLs for GetCapabilities, DescribeCoverage and GetCoverage
//! - Parsing of capabilities, coverage descriptions and exception reports
//!   through an extensible parser registry

pub mod kvp;
pub mod namespaces;
pub mod parse;
pub mod registry;
pub mod xml;
pub mod xpath;

pub use kvp::{
    describe_coverage_url, get_capabilities_url, get_coverage_url, CoverageIds,
    GetCapabilitiesOptions, GetCoverageOptions, KvpRequest, DEFAULT_SUBSET_CRS,
};
pub use parse::WcsParser;
pub use registry::{parse_fn, ParseContext, ParseFn, ParseOptions, ParserExtension, ParserRegistry};
pub use xml::{XmlAttribute, XmlDocument, XmlElement};
pub use xpath::{Match, NamespaceMap, NodeAccess, XPath};

pub use wcs_common::{Parsed, WcsError, WcsResult};
