//! Parsed `wcs:CoverageDescription(s)` documents.

use serde::{Deserialize, Serialize};

use crate::merge::merge_fields;
use crate::time::TimePeriod;

/// Parsed DescribeCoverage response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDescriptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_descriptions: Option<Vec<CoverageDescription>>,
}

merge_fields!(CoverageDescriptions, leaves: [coverage_descriptions], nested: []);

/// A single coverage description.
///
/// `footprint` and `time_period` are contributed by the EO-WCS extension
/// parsers and stay `None` when only the core parsers are installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<GridEnvelope>,
    /// Number of grid cells per axis, `high + 1 - low`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_vectors: Option<Vec<Vec<f64>>>,
    /// Per-axis resolution derived from the offset vectors. Only meaningful
    /// for axis-aligned grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_type: Option<Vec<RangeField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_format: Option<String>,
    /// Flattened footprint polygon coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footprint: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<TimePeriod>,
}

merge_fields!(
    CoverageDescription,
    leaves: [
        coverage_id,
        dimensions,
        size,
        origin,
        offset_vectors,
        resolution,
        range_type,
        coverage_subtype,
        native_format,
        footprint,
        time_period,
    ],
    nested: [bounds, envelope]
);

impl CoverageDescription {
    /// Names of all range type fields (bands), in document order.
    pub fn band_names(&self) -> Vec<&str> {
        self.range_type
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|f| f.name.as_deref())
            .collect()
    }
}

/// `gml:boundedBy/gml:Envelope`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Vec<f64>>,
}

merge_fields!(Bounds, leaves: [projection, lower, upper], nested: []);

/// Integer grid limits, `gml:GridEnvelope`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Vec<i64>>,
}

merge_fields!(GridEnvelope, leaves: [low, high], nested: []);

/// One `swe:field` of the range type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeField {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    pub nil_values: Vec<NilValue>,
    /// Allowed-value interval, usually `[min, max]`.
    pub allowed_values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant_figures: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NilValue {
    pub value: Option<i64>,
    pub reason: Option<String>,
}
