//! EO-WCS dataset series and coverage set documents.

use serde::{Deserialize, Serialize};

use crate::coverage::CoverageDescription;
use crate::merge::merge_fields;
use crate::time::TimePeriod;

/// Parsed DescribeEOCoverageSet response: the coverage descriptions and
/// dataset series descriptions it contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EoCoverageSetDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_descriptions: Option<Vec<CoverageDescription>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_series_descriptions: Option<Vec<DatasetSeriesDescription>>,
}

merge_fields!(
    EoCoverageSetDescription,
    leaves: [coverage_descriptions, dataset_series_descriptions],
    nested: []
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSeriesDescriptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_series_descriptions: Option<Vec<DatasetSeriesDescription>>,
}

merge_fields!(DatasetSeriesDescriptions, leaves: [dataset_series_descriptions], nested: []);

/// A dataset series (or dataset series summary in the capabilities).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSeriesDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_series_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<TimePeriod>,
}

merge_fields!(DatasetSeriesDescription, leaves: [dataset_series_id, time_period], nested: []);
