//! Namespace URIs added by EO-WCS.

use once_cell::sync::Lazy;

use wcs_protocol::namespaces::{CORE, GML, GMLCOV, WCS};
use wcs_protocol::NamespaceMap;

pub const EOP: &str = "http://www.opengis.net/eop/2.0";
pub const OM: &str = "http://www.opengis.net/om/2.0";
pub const WCSEO: &str = "http://www.opengis.net/wcs/wcseo/1.0";
/// Namespace used by servers implementing pre-release drafts of EO-WCS.
pub const WCSEO_OLD: &str = "http://www.opengis.net/wcseo/1.0";

/// Core prefixes plus `eop`, `om`, `wcseo` and `wcseoold`.
pub static EO: Lazy<NamespaceMap> = Lazy::new(|| {
    CORE.extend([
        ("wcs", WCS),
        ("gml", GML),
        ("gmlcov", GMLCOV),
        ("eop", EOP),
        ("om", OM),
        ("wcseo", WCSEO),
        ("wcseoold", WCSEO_OLD),
    ])
});
