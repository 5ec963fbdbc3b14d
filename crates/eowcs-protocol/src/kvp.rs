//! DescribeEOCoverageSet KVP request URLs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wcs_common::{BoundingBox, ExtraParams, WcsError, WcsResult};
use wcs_protocol::kvp::{require, resolve_spatial_subsets, KvpRequest, DEFAULT_SUBSET_CRS};

/// How coverages are matched against the requested subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    Overlaps,
    Contains,
}

impl Containment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Containment::Overlaps => "overlaps",
            Containment::Contains => "contains",
        }
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Containment {
    type Err = WcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overlaps" => Ok(Containment::Overlaps),
            "contains" => Ok(Containment::Contains),
            _ => Err(WcsError::InvalidArgument {
                param: "containment".to_string(),
                message: format!("Expected 'overlaps' or 'contains', got '{}'", s),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeEoCoverageSetOptions {
    pub bbox: Option<BoundingBox>,
    pub subset_x: Option<[f64; 2]>,
    pub subset_y: Option<[f64; 2]>,
    pub subset_crs: Option<String>,
    /// Begin and end of the phenomenon time subset, sent verbatim.
    pub subset_time: Option<[String; 2]>,
    pub containment: Option<Containment>,
    /// Maximum number of coverage descriptions in the response.
    pub count: Option<u32>,
    /// Any of `CoverageDescriptions` and `DatasetSeriesDescriptions`.
    pub sections: Option<Vec<String>>,
}

pub fn describe_eo_coverage_set_url(
    url: &str,
    eoid: &str,
    options: &DescribeEoCoverageSetOptions,
    extra: &ExtraParams,
) -> WcsResult<String> {
    require("url", url)?;
    require("eoid", eoid)?;

    let (subset_x, subset_y) =
        resolve_spatial_subsets(options.bbox.as_ref(), options.subset_x, options.subset_y);
    let crs = options.subset_crs.as_deref().unwrap_or(DEFAULT_SUBSET_CRS);

    let mut request = KvpRequest::new(url, "describeeocoverageset")?;
    request
        .param("eoid", eoid)
        .param_opt(
            "subset",
            subset_x.map(|[min, max]| format!("x,{}({},{})", crs, min, max)),
        )
        .param_opt(
            "subset",
            subset_y.map(|[min, max]| format!("y,{}({},{})", crs, min, max)),
        )
        .param_opt(
            "subset",
            options
                .subset_time
                .as_ref()
                .map(|[begin, end]| format!("phenomenonTime(\"{}\",\"{}\")", begin, end)),
        )
        .param_opt("containment", options.containment)
        .param_opt("count", options.count)
        .list_opt("sections", options.sections.as_deref());

    Ok(request.finish(extra))
}
