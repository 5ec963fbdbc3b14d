//! EO-WCS response parsers.
//!
//! Registers parsers for the EO-only documents and extends the core
//! `Capabilities` and `CoverageDescription` results with dataset series,
//! footprints and acquisition times. Every `wcseo` lookup also tries the
//! legacy `wcseoold` namespace.

use tracing::warn;

use wcs_common::values::{non_empty, parse_float_list};
use wcs_common::{
    Capabilities, Contents, CoverageDescription, DatasetSeriesDescription,
    DatasetSeriesDescriptions, EoCoverageSetDescription, Parsed, TimePeriod, WcsResult,
};
use wcs_protocol::{
    parse_fn, NodeAccess, ParseContext, ParserExtension, ParserRegistry, WcsParser, XmlElement,
};

use crate::namespaces::EO;

const EO_METADATA: [&str; 4] = [
    "gmlcov:metadata/gmlcov:Extension/wcseo:EOMetadata",
    "gmlcov:metadata/wcseo:EOMetadata",
    "gmlcov:metadata/gmlcov:Extension/wcseoold:EOMetadata",
    "gmlcov:metadata/wcseoold:EOMetadata",
];

const FOOTPRINT: &str = "eop:EarthObservation/om:featureOfInterest/eop:Footprint/\
    eop:multiExtentOf/gml:MultiSurface/gml:surfaceMember/gml:Polygon/gml:exterior/\
    gml:LinearRing/gml:posList/text()";

fn access() -> NodeAccess<'static> {
    NodeAccess::new(&EO)
}

/// The EO-WCS parser extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct EoWcsExtension;

impl ParserExtension<Parsed> for EoWcsExtension {
    fn name(&self) -> &str {
        "eowcs"
    }

    fn register(&self, registry: &mut ParserRegistry<Parsed>) {
        registry.register_all([
            ("EOCoverageSetDescription", parse_fn(parse_eo_coverage_set_description)),
            ("DatasetSeriesDescriptions", parse_fn(parse_dataset_series_descriptions)),
            ("DatasetSeriesDescription", parse_fn(parse_dataset_series_description)),
            ("Capabilities", parse_fn(parse_extended_capabilities)),
            ("CoverageDescription", parse_fn(parse_extended_coverage_description)),
        ]);
    }
}

/// A [`WcsParser`] with the core parsers and the EO-WCS extension.
pub fn parser() -> WcsParser {
    WcsParser::new().with_extension(&EoWcsExtension)
}

/// `wcseo:EOCoverageSetDescription`: the nested coverage descriptions and
/// dataset series descriptions, each dispatched through the registry. An
/// absent section yields an empty list.
pub fn parse_eo_coverage_set_description(
    ctx: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let xp = access();

    let coverage_descriptions = match xp.node(node, "wcs:CoverageDescriptions")? {
        Some(section) => expect(
            ctx.dispatch("CoverageDescriptions", section)?.into_coverage_descriptions(),
            "CoverageDescriptions",
        )
        .and_then(|d| d.coverage_descriptions)
        .unwrap_or_default(),
        None => Vec::new(),
    };

    let dataset_series_descriptions = match xp.node(
        node,
        [
            "wcseo:DatasetSeriesDescriptions",
            "wcseoold:DatasetSeriesDescriptions",
        ],
    )? {
        Some(section) => expect(
            ctx.dispatch("DatasetSeriesDescriptions", section)?
                .into_dataset_series_descriptions(),
            "DatasetSeriesDescriptions",
        )
        .and_then(|d| d.dataset_series_descriptions)
        .unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(Parsed::EoCoverageSetDescription(EoCoverageSetDescription {
        coverage_descriptions: Some(coverage_descriptions),
        dataset_series_descriptions: Some(dataset_series_descriptions),
    }))
}

pub fn parse_dataset_series_descriptions(
    ctx: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let descriptions = dataset_series(
        ctx,
        node,
        [
            "wcseo:DatasetSeriesDescription",
            "wcseoold:DatasetSeriesDescription",
        ],
    )?;

    Ok(Parsed::DatasetSeriesDescriptions(DatasetSeriesDescriptions {
        dataset_series_descriptions: Some(descriptions),
    }))
}

/// A dataset series description or summary: id and time period.
pub fn parse_dataset_series_description(
    _: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let xp = access();
    let id = xp.text(
        node,
        ["wcseo:DatasetSeriesId/text()", "wcseoold:DatasetSeriesId/text()"],
    )?;

    Ok(Parsed::DatasetSeriesDescription(DatasetSeriesDescription {
        dataset_series_id: non_empty(id),
        time_period: Some(time_period(&xp, node)?),
    }))
}

/// Adds `contents.datasetSeries` from the `wcseo:DatasetSeriesSummary`
/// elements of the contents extension.
pub fn parse_extended_capabilities(
    ctx: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let series = dataset_series(
        ctx,
        node,
        [
            "wcs:Contents/wcs:Extension/wcseo:DatasetSeriesSummary",
            "wcs:Contents/wcs:Extension/wcseoold:DatasetSeriesSummary",
        ],
    )?;

    Ok(Parsed::Capabilities(Capabilities {
        contents: Some(Contents {
            coverages: None,
            dataset_series: Some(series),
        }),
        ..Default::default()
    }))
}

/// Adds footprint and phenomenon time from the EO metadata. Coverages
/// without EO metadata contribute nothing.
pub fn parse_extended_coverage_description(
    _: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let xp = access();
    let Some(metadata) = xp.node(node, EO_METADATA)? else {
        return Ok(Parsed::CoverageDescription(CoverageDescription::default()));
    };

    let footprint = parse_float_list(&xp.text(metadata, FOOTPRINT)?, None);
    let time_period = match xp.node(metadata, "eop:EarthObservation/om:phenomenonTime")? {
        Some(phenomenon_time) => Some(time_period(&xp, phenomenon_time)?),
        None => None,
    };

    Ok(Parsed::CoverageDescription(CoverageDescription {
        footprint: Some(footprint),
        time_period,
        ..Default::default()
    }))
}

fn dataset_series<const N: usize>(
    ctx: &ParseContext<'_, Parsed>,
    node: &XmlElement,
    paths: [&str; N],
) -> WcsResult<Vec<DatasetSeriesDescription>> {
    let mut series = Vec::new();
    for child in access().nodes(node, paths)? {
        let parsed = ctx.dispatch("DatasetSeriesDescription", child)?;
        if let Some(description) = expect(
            parsed.into_dataset_series_description(),
            "DatasetSeriesDescription",
        ) {
            series.push(description);
        }
    }
    Ok(series)
}

fn time_period(xp: &NodeAccess<'_>, node: &XmlElement) -> WcsResult<TimePeriod> {
    Ok(TimePeriod::from_positions(
        &xp.text(node, "gml:TimePeriod/gml:beginPosition/text()")?,
        &xp.text(node, "gml:TimePeriod/gml:endPosition/text()")?,
    ))
}

fn expect<T>(value: Option<T>, kind: &str) -> Option<T> {
    if value.is_none() {
        warn!(expected = kind, "Nested parse yielded a different document kind");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcs_protocol::XmlDocument;

    #[test]
    fn test_extension_registers_after_core() {
        let parser = parser();
        let registry = parser.registry();

        assert_eq!(registry.installed(), ["eowcs".to_string()]);
        assert_eq!(registry.parsers_for("Capabilities"), 2);
        assert_eq!(registry.parsers_for("CoverageDescription"), 2);
        assert_eq!(registry.parsers_for("CoverageDescriptions"), 1);
        assert_eq!(registry.parsers_for("EOCoverageSetDescription"), 1);
    }

    #[test]
    fn test_coverage_without_eo_metadata_contributes_nothing() {
        let doc = XmlDocument::parse(
            r#"<wcs:CoverageDescription xmlns:wcs="http://www.opengis.net/wcs/2.0">
                 <wcs:CoverageId>plain</wcs:CoverageId>
               </wcs:CoverageDescription>"#,
        )
        .unwrap();
        let mut registry = ParserRegistry::new();
        EoWcsExtension.register(&mut registry);

        let parsed = registry.dispatch("CoverageDescription", doc.root()).unwrap();
        assert_eq!(
            parsed,
            Parsed::CoverageDescription(CoverageDescription::default())
        );
    }

    #[test]
    fn test_eo_only_registry_fails_on_core_tags() {
        let doc = XmlDocument::parse(
            r#"<wcseo:EOCoverageSetDescription xmlns:wcseo="http://www.opengis.net/wcs/wcseo/1.0"
                   xmlns:wcs="http://www.opengis.net/wcs/2.0">
                 <wcs:CoverageDescriptions/>
               </wcseo:EOCoverageSetDescription>"#,
        )
        .unwrap();
        let mut registry = ParserRegistry::new();
        registry.install(&EoWcsExtension);

        let err = registry
            .dispatch("EOCoverageSetDescription", doc.root())
            .unwrap_err();
        assert!(matches!(
            err,
            wcs_common::WcsError::NoParserRegistered(ref tag) if tag == "CoverageDescriptions"
        ));
    }
}
