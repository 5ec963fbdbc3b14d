//! The parsed-document tagged union, one variant per root tag.

use serde::{Deserialize, Serialize};

use crate::capabilities::Capabilities;
use crate::coverage::{CoverageDescription, CoverageDescriptions};
use crate::error::WcsError;
use crate::merge::{merge_fields, Merge};
use crate::series::{DatasetSeriesDescription, DatasetSeriesDescriptions, EoCoverageSetDescription};

/// A parsed WCS / EO-WCS response document.
///
/// Parser functions return a partial `Parsed` value. Partials of the same
/// variant merge field by field; a partial of a different variant replaces
/// the accumulated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Parsed {
    Capabilities(Capabilities),
    ExceptionReport(ExceptionReport),
    CoverageDescriptions(CoverageDescriptions),
    CoverageDescription(CoverageDescription),
    #[serde(rename = "EOCoverageSetDescription")]
    EoCoverageSetDescription(EoCoverageSetDescription),
    DatasetSeriesDescriptions(DatasetSeriesDescriptions),
    DatasetSeriesDescription(DatasetSeriesDescription),
}

impl Parsed {
    /// The root tag name this variant corresponds to.
    pub fn kind(&self) -> &'static str {
        match self {
            Parsed::Capabilities(_) => "Capabilities",
            Parsed::ExceptionReport(_) => "ExceptionReport",
            Parsed::CoverageDescriptions(_) => "CoverageDescriptions",
            Parsed::CoverageDescription(_) => "CoverageDescription",
            Parsed::EoCoverageSetDescription(_) => "EOCoverageSetDescription",
            Parsed::DatasetSeriesDescriptions(_) => "DatasetSeriesDescriptions",
            Parsed::DatasetSeriesDescription(_) => "DatasetSeriesDescription",
        }
    }

    pub fn into_capabilities(self) -> Option<Capabilities> {
        match self {
            Parsed::Capabilities(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_exception_report(self) -> Option<ExceptionReport> {
        match self {
            Parsed::ExceptionReport(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_coverage_descriptions(self) -> Option<CoverageDescriptions> {
        match self {
            Parsed::CoverageDescriptions(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_coverage_description(self) -> Option<CoverageDescription> {
        match self {
            Parsed::CoverageDescription(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_eo_coverage_set_description(self) -> Option<EoCoverageSetDescription> {
        match self {
            Parsed::EoCoverageSetDescription(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_dataset_series_descriptions(self) -> Option<DatasetSeriesDescriptions> {
        match self {
            Parsed::DatasetSeriesDescriptions(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_dataset_series_description(self) -> Option<DatasetSeriesDescription> {
        match self {
            Parsed::DatasetSeriesDescription(d) => Some(d),
            _ => None,
        }
    }

    /// Turn an exception report into a `ServiceException` error, passing any
    /// other document through.
    pub fn into_result(self) -> Result<Parsed, WcsError> {
        match self {
            Parsed::ExceptionReport(report) => Err(report.into()),
            other => Ok(other),
        }
    }
}

impl Merge for Parsed {
    fn merge(&mut self, other: Self) {
        match (self, other) {
            (Parsed::Capabilities(a), Parsed::Capabilities(b)) => a.merge(b),
            (Parsed::ExceptionReport(a), Parsed::ExceptionReport(b)) => a.merge(b),
            (Parsed::CoverageDescriptions(a), Parsed::CoverageDescriptions(b)) => a.merge(b),
            (Parsed::CoverageDescription(a), Parsed::CoverageDescription(b)) => a.merge(b),
            (Parsed::EoCoverageSetDescription(a), Parsed::EoCoverageSetDescription(b)) => {
                a.merge(b)
            }
            (Parsed::DatasetSeriesDescriptions(a), Parsed::DatasetSeriesDescriptions(b)) => {
                a.merge(b)
            }
            (Parsed::DatasetSeriesDescription(a), Parsed::DatasetSeriesDescription(b)) => {
                a.merge(b)
            }
            (this, other) => *this = other,
        }
    }
}

/// A well-formed `ows:ExceptionReport` returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionReport {
    pub code: Option<String>,
    pub locator: Option<String>,
    pub text: Option<String>,
}

merge_fields!(ExceptionReport, leaves: [code, locator, text], nested: []);

impl From<ExceptionReport> for WcsError {
    fn from(report: ExceptionReport) -> Self {
        WcsError::ServiceException {
            code: report.code.unwrap_or_else(|| "NoApplicableCode".to_string()),
            locator: report.locator,
            text: report.text.unwrap_or_default(),
        }
    }
}
