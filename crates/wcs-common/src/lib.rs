//! Common types and utilities shared across the WCS client crates.

pub mod bbox;
pub mod capabilities;
pub mod coverage;
pub mod document;
pub mod error;
pub mod kvp;
pub mod merge;
pub mod series;
pub mod time;
pub mod values;

pub use bbox::BoundingBox;
pub use capabilities::{
    Address, Capabilities, ContactInfo, Contents, CoverageSummary, Operation, Phone,
    ServiceIdentification, ServiceMetadata, ServiceProvider,
};
pub use coverage::{
    Bounds, CoverageDescription, CoverageDescriptions, GridEnvelope, NilValue, RangeField,
};
pub use document::{ExceptionReport, Parsed};
pub use error::{WcsError, WcsResult};
pub use kvp::ExtraParams;
pub use merge::Merge;
pub use series::{DatasetSeriesDescription, DatasetSeriesDescriptions, EoCoverageSetDescription};
pub use time::TimePeriod;
