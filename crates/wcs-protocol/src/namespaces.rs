//! Namespace URIs of the WCS 2.0 core vocabulary.

use once_cell::sync::Lazy;

use crate::xpath::NamespaceMap;

pub const XLINK: &str = "http://www.w3.org/1999/xlink";
pub const OWS: &str = "http://www.opengis.net/ows/2.0";
pub const WCS: &str = "http://www.opengis.net/wcs/2.0";
pub const GML: &str = "http://www.opengis.net/gml/3.2";
pub const GMLCOV: &str = "http://www.opengis.net/gmlcov/1.0";
pub const SWE: &str = "http://www.opengis.net/swe/2.0";
pub const CRS: &str = "http://www.opengis.net/wcs/crs/1.0";
pub const INT: &str = "http://www.opengis.net/wcs/interpolation/1.0";

/// Prefixes used by the core parsers.
pub static CORE: Lazy<NamespaceMap> = Lazy::new(|| {
    NamespaceMap::new([
        ("xlink", XLINK),
        ("ows", OWS),
        ("wcs", WCS),
        ("gml", GML),
        ("gmlcov", GMLCOV),
        ("swe", SWE),
        ("crs", CRS),
        ("int", INT),
    ])
});
