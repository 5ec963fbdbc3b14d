//! KVP request URL builders for the core WCS 2.0 operations.
//!
//! Every URL starts with `service=wcs&version=2.0.0&request=<name>`. Options
//! are emitted when present, in a fixed order, and vendor extras come last.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use wcs_common::{BoundingBox, ExtraParams, WcsError, WcsResult};

/// CRS assumed for spatial subsets when none is given.
pub const DEFAULT_SUBSET_CRS: &str = "http://www.opengis.net/def/crs/EPSG/0/4326";

const SERVICE: &str = "wcs";
const VERSION: &str = "2.0.0";

/// Accumulates the query parameters of one request.
#[derive(Debug, Clone)]
pub struct KvpRequest {
    url: String,
    params: Vec<String>,
}

impl KvpRequest {
    /// Start a request against `url`, emitting the fixed leading triple.
    pub fn new(url: &str, request: &str) -> WcsResult<Self> {
        let url = require("url", url)?;
        Ok(Self {
            url: url.to_string(),
            params: vec![
                format!("service={}", SERVICE),
                format!("version={}", VERSION),
                format!("request={}", request),
            ],
        })
    }

    pub fn param(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.params.push(format!("{}={}", key, value));
        self
    }

    /// Emit `key=value` only when `value` is present.
    pub fn param_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.param(key, value);
        }
        self
    }

    /// Emit `key=a,b,c` when `values` is present.
    pub fn list_opt<S: AsRef<str>>(&mut self, key: &str, values: Option<&[S]>) -> &mut Self {
        if let Some(values) = values {
            self.param(key, join(values));
        }
        self
    }

    /// Append the extras and render the final URL.
    pub fn finish(self, extra: &ExtraParams) -> String {
        let separator = if self.url.ends_with('?') { "" } else { "?" };
        let mut url = format!("{}{}{}", self.url, separator, self.params.join("&"));
        if !extra.is_empty() {
            url.push('&');
            url.push_str(&extra.to_kvp());
        }
        trace!(url = %url, "Built KVP request");
        url
    }
}

/// Reject an empty or blank mandatory argument.
pub fn require<'a>(param: &str, value: &'a str) -> WcsResult<&'a str> {
    if value.trim().is_empty() {
        Err(WcsError::missing(param))
    } else {
        Ok(value)
    }
}

fn join<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split `bbox` into per-axis subsets unless either explicit subset is set.
pub fn resolve_spatial_subsets(
    bbox: Option<&BoundingBox>,
    subset_x: Option<[f64; 2]>,
    subset_y: Option<[f64; 2]>,
) -> (Option<[f64; 2]>, Option<[f64; 2]>) {
    match bbox {
        Some(bbox) if subset_x.is_none() && subset_y.is_none() => {
            (Some(bbox.x_range()), Some(bbox.y_range()))
        }
        _ => (subset_x, subset_y),
    }
}

/// Split a two-element convenience option into per-axis values unless
/// either explicit value is set.
pub fn resolve_axis_pair<T: Copy>(
    pair: Option<[T; 2]>,
    x: Option<T>,
    y: Option<T>,
) -> (Option<T>, Option<T>) {
    match pair {
        Some([px, py]) if x.is_none() && y.is_none() => (Some(px), Some(py)),
        _ => (x, y),
    }
}

/// One coverage id or several, joined with commas on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageIds {
    Single(String),
    List(Vec<String>),
}

impl CoverageIds {
    fn encode(&self) -> WcsResult<String> {
        let joined = match self {
            CoverageIds::Single(id) => id.clone(),
            CoverageIds::List(ids) => join(ids),
        };
        require("coverageids", &joined)?;
        Ok(joined)
    }
}

impl From<&str> for CoverageIds {
    fn from(id: &str) -> Self {
        CoverageIds::Single(id.to_string())
    }
}

impl From<String> for CoverageIds {
    fn from(id: String) -> Self {
        CoverageIds::Single(id)
    }
}

impl From<Vec<String>> for CoverageIds {
    fn from(ids: Vec<String>) -> Self {
        CoverageIds::List(ids)
    }
}

impl From<Vec<&str>> for CoverageIds {
    fn from(ids: Vec<&str>) -> Self {
        CoverageIds::List(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for CoverageIds {
    fn from(ids: &[&str]) -> Self {
        CoverageIds::List(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CoverageIds {
    fn from(ids: [&str; N]) -> Self {
        CoverageIds::List(ids.iter().map(|id| id.to_string()).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetCapabilitiesOptions {
    pub updatesequence: Option<String>,
    /// Any of `ServiceIdentification`, `ServiceProvider`,
    /// `OperationsMetadata` and `Contents`.
    pub sections: Option<Vec<String>>,
}

/// GetCoverage options. Explicit per-axis values take precedence over the
/// `bbox`, `size` and `resolution` conveniences.
///
/// WCS 2.0 KVP has no resolution parameter, so the resolution fields are
/// accepted and resolved but never sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetCoverageOptions {
    pub format: Option<String>,
    pub bbox: Option<BoundingBox>,
    pub subset_x: Option<[f64; 2]>,
    pub subset_y: Option<[f64; 2]>,
    pub subset_crs: Option<String>,
    pub range_subset: Option<Vec<String>>,
    pub size: Option<[u32; 2]>,
    pub size_x: Option<u32>,
    pub size_y: Option<u32>,
    pub resolution: Option<[f64; 2]>,
    pub resolution_x: Option<f64>,
    pub resolution_y: Option<f64>,
    pub interpolation: Option<String>,
    pub output_crs: Option<String>,
    /// Request `multipart/mixed` output with the coverage metadata.
    pub multipart: bool,
}

pub fn get_capabilities_url(
    url: &str,
    options: &GetCapabilitiesOptions,
    extra: &ExtraParams,
) -> WcsResult<String> {
    let mut request = KvpRequest::new(url, "getcapabilities")?;
    request
        .param_opt("updatesequence", options.updatesequence.as_deref())
        .list_opt("sections", options.sections.as_deref());
    Ok(request.finish(extra))
}

pub fn describe_coverage_url(
    url: &str,
    coverage_ids: impl Into<CoverageIds>,
    extra: &ExtraParams,
) -> WcsResult<String> {
    require("url", url)?;
    let ids = coverage_ids.into().encode()?;

    let mut request = KvpRequest::new(url, "describecoverage")?;
    request.param("coverageid", ids);
    Ok(request.finish(extra))
}

pub fn get_coverage_url(
    url: &str,
    coverage_id: &str,
    options: &GetCoverageOptions,
    extra: &ExtraParams,
) -> WcsResult<String> {
    require("url", url)?;
    require("coverageid", coverage_id)?;
    if let Some(format) = &options.format {
        require("format", format)?;
    }

    let (subset_x, subset_y) =
        resolve_spatial_subsets(options.bbox.as_ref(), options.subset_x, options.subset_y);
    let (size_x, size_y) = resolve_axis_pair(options.size, options.size_x, options.size_y);
    let (resolution_x, resolution_y) =
        resolve_axis_pair(options.resolution, options.resolution_x, options.resolution_y);
    if resolution_x.is_some() || resolution_y.is_some() {
        debug!(
            ?resolution_x,
            ?resolution_y,
            "Resolution is not a GetCoverage parameter, not sent"
        );
    }

    let mut request = KvpRequest::new(url, "getcoverage")?;
    request
        .param("coverageid", coverage_id)
        .param_opt("format", options.format.as_deref())
        .param_opt("subset", subset_x.map(|[min, max]| format!("x({},{})", min, max)))
        .param_opt("subset", subset_y.map(|[min, max]| format!("y({},{})", min, max)));

    if subset_x.is_some() || subset_y.is_some() || options.subset_crs.is_some() {
        request.param(
            "subsettingCrs",
            options.subset_crs.as_deref().unwrap_or(DEFAULT_SUBSET_CRS),
        );
    }

    let sizes: Vec<String> = [("x", size_x), ("y", size_y)]
        .into_iter()
        .filter_map(|(axis, size)| size.map(|s| format!("{}({})", axis, s)))
        .collect();
    if !sizes.is_empty() {
        request.param("scalesize", sizes.join(","));
    }

    request
        .list_opt("rangesubset", options.range_subset.as_deref())
        .param_opt("interpolation", options.interpolation.as_deref())
        .param_opt("outputcrs", options.output_crs.as_deref());

    if options.multipart {
        request.param("mediatype", "multipart/mixed");
    }

    Ok(request.finish(extra))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://example.org/wcs";

    fn query(url: &str) -> Vec<&str> {
        url.split_once('?').map(|(_, q)| q).unwrap_or("").split('&').collect()
    }

    #[test]
    fn test_fixed_leading_triple() {
        let urls = [
            get_capabilities_url(URL, &Default::default(), &Default::default()).unwrap(),
            describe_coverage_url(URL, "A", &Default::default()).unwrap(),
            get_coverage_url(URL, "C1", &Default::default(), &Default::default()).unwrap(),
        ];
        let names = ["getcapabilities", "describecoverage", "getcoverage"];

        for (url, name) in urls.iter().zip(names) {
            let tokens = query(url);
            assert_eq!(tokens[0], "service=wcs");
            assert_eq!(tokens[1], "version=2.0.0");
            assert_eq!(tokens[2], format!("request={}", name));
        }
    }

    #[test]
    fn test_question_mark_not_doubled() {
        let url = get_capabilities_url(
            "http://example.org/wcs?",
            &Default::default(),
            &Default::default(),
        )
        .unwrap();
        assert_eq!(
            url,
            "http://example.org/wcs?service=wcs&version=2.0.0&request=getcapabilities"
        );
    }

    #[test]
    fn test_capabilities_options_and_extras() {
        let options = GetCapabilitiesOptions {
            updatesequence: Some("u1".to_string()),
            sections: Some(vec!["ServiceIdentification".to_string(), "Contents".to_string()]),
        };
        let extra = ExtraParams::new().with("map", "/data/wcs.map");
        let url = get_capabilities_url(URL, &options, &extra).unwrap();
        assert!(url.ends_with(
            "request=getcapabilities&updatesequence=u1\
             &sections=ServiceIdentification,Contents&map=/data/wcs.map"
        ));
    }

    #[test]
    fn test_describe_coverage_ids() {
        let single = describe_coverage_url(URL, "A", &Default::default()).unwrap();
        assert!(single.ends_with("&coverageid=A"));

        let list = describe_coverage_url(URL, ["A", "B"], &Default::default()).unwrap();
        assert!(list.ends_with("&coverageid=A,B"));
    }

    #[test]
    fn test_missing_mandatory_arguments() {
        assert!(matches!(
            get_capabilities_url("", &Default::default(), &Default::default()),
            Err(WcsError::InvalidArgument { ref param, .. }) if param == "url"
        ));
        assert!(matches!(
            describe_coverage_url(URL, Vec::<String>::new(), &Default::default()),
            Err(WcsError::InvalidArgument { ref param, .. }) if param == "coverageids"
        ));
        assert!(matches!(
            get_coverage_url(URL, " ", &Default::default(), &Default::default()),
            Err(WcsError::InvalidArgument { ref param, .. }) if param == "coverageid"
        ));

        let options = GetCoverageOptions {
            format: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            get_coverage_url(URL, "C1", &options, &Default::default()),
            Err(WcsError::InvalidArgument { ref param, .. }) if param == "format"
        ));
    }

    #[test]
    fn test_bbox_equivalent_to_explicit_subsets() {
        let from_bbox = GetCoverageOptions {
            bbox: Some(BoundingBox::new(0.0, 10.0, 5.0, 15.0)),
            ..Default::default()
        };
        let explicit = GetCoverageOptions {
            subset_x: Some([0.0, 5.0]),
            subset_y: Some([10.0, 15.0]),
            ..Default::default()
        };

        let a = get_coverage_url(URL, "C1", &from_bbox, &Default::default()).unwrap();
        let b = get_coverage_url(URL, "C1", &explicit, &Default::default()).unwrap();
        assert_eq!(a, b);
        assert!(query(&a).contains(&"subset=x(0,5)"));
        assert!(query(&a).contains(&"subset=y(10,15)"));
    }

    #[test]
    fn test_explicit_subset_wins_over_bbox() {
        let options = GetCoverageOptions {
            bbox: Some(BoundingBox::new(0.0, 10.0, 5.0, 15.0)),
            subset_x: Some([1.0, 2.0]),
            ..Default::default()
        };
        let url = get_coverage_url(URL, "C1", &options, &Default::default()).unwrap();
        let tokens = query(&url);
        assert!(tokens.contains(&"subset=x(1,2)"));
        assert!(!url.contains("x(0,5)"));
        assert!(!url.contains("subset=y("));
    }

    #[test]
    fn test_subsetting_crs_defaults_with_subset() {
        let options = GetCoverageOptions {
            subset_x: Some([0.0, 1.0]),
            ..Default::default()
        };
        let url = get_coverage_url(URL, "C1", &options, &Default::default()).unwrap();
        assert!(url.contains(&format!("&subsettingCrs={}", DEFAULT_SUBSET_CRS)));

        let bare = get_coverage_url(URL, "C1", &Default::default(), &Default::default()).unwrap();
        assert!(!bare.contains("subsettingCrs"));

        let crs_only = GetCoverageOptions {
            subset_crs: Some("http://www.opengis.net/def/crs/EPSG/0/3857".to_string()),
            ..Default::default()
        };
        let url = get_coverage_url(URL, "C1", &crs_only, &Default::default()).unwrap();
        assert!(url.ends_with("subsettingCrs=http://www.opengis.net/def/crs/EPSG/0/3857"));
    }

    #[test]
    fn test_full_emission_order() {
        let options = GetCoverageOptions {
            format: Some("image/tiff".to_string()),
            subset_x: Some([0.0, 5.0]),
            subset_y: Some([10.0, 15.0]),
            range_subset: Some(vec!["red".to_string(), "nir".to_string()]),
            size: Some([100, 200]),
            resolution: Some([0.5, 0.25]),
            interpolation: Some("nearest".to_string()),
            output_crs: Some("EPSG:3857".to_string()),
            multipart: true,
            ..Default::default()
        };
        let extra = ExtraParams::new().with("vendor", "1");
        let url = get_coverage_url(URL, "C1", &options, &extra).unwrap();

        assert_eq!(
            query(&url)[3..],
            [
                "coverageid=C1",
                "format=image/tiff",
                "subset=x(0,5)",
                "subset=y(10,15)",
                "subsettingCrs=http://www.opengis.net/def/crs/EPSG/0/4326",
                "scalesize=x(100),y(200)",
                "rangesubset=red,nir",
                "interpolation=nearest",
                "outputcrs=EPSG:3857",
                "mediatype=multipart/mixed",
                "vendor=1",
            ]
        );
    }

    #[test]
    fn test_zero_values_are_emitted() {
        let options = GetCoverageOptions {
            size_x: Some(0),
            subset_y: Some([0.0, 0.0]),
            ..Default::default()
        };
        let url = get_coverage_url(URL, "C1", &options, &Default::default()).unwrap();
        assert!(url.contains("&scalesize=x(0)"));
        assert!(url.contains("&subset=y(0,0)"));
    }

    #[test]
    fn test_resolution_is_never_sent() {
        let options = GetCoverageOptions {
            resolution: Some([0.5, 0.5]),
            resolution_x: Some(0.25),
            resolution_y: Some(0.0),
            ..Default::default()
        };
        let url = get_coverage_url(URL, "C1", &options, &Default::default()).unwrap();
        assert!(!url.contains("resolution"));
        assert_eq!(
            url,
            format!("{}?service=wcs&version=2.0.0&request=getcoverage&coverageid=C1", URL)
        );
    }

    #[test]
    fn test_explicit_size_wins_over_pair() {
        let options = GetCoverageOptions {
            size: Some([100, 200]),
            size_y: Some(50),
            ..Default::default()
        };
        let url = get_coverage_url(URL, "C1", &options, &Default::default()).unwrap();
        assert!(url.contains("&scalesize=y(50)"));
        assert!(!url.contains("x(100)"));
    }

    #[test]
    fn test_options_from_json() {
        let options: GetCoverageOptions =
            serde_json::from_str(r#"{"format": "image/png", "size": [10, 20], "multipart": true}"#)
                .unwrap();
        assert_eq!(options.format.as_deref(), Some("image/png"));
        assert_eq!(options.size, Some([10, 20]));
        assert!(options.multipart);
    }
}
