//! EO-WCS, the Earth Observation application profile of WCS 2.0.
//!
//! Supports:
//! - DescribeEOCoverageSet KVP request URLs
//! - Parsing of EO coverage sets, dataset series and the EO additions to
//!   capabilities and coverage descriptions, installed as a
//!   [`ParserExtension`](wcs_protocol::ParserExtension)

pub mod kvp;
pub mod namespaces;
pub mod parse;

pub use kvp::{describe_eo_coverage_set_url, Containment, DescribeEoCoverageSetOptions};
pub use parse::{parser, EoWcsExtension};
