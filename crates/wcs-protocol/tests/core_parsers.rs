//! Integration tests for the core WCS parsers.

use test_utils::{assert_approx_eq, assert_slice_approx_eq, fixtures};
use wcs_common::{NilValue, Parsed, WcsError};
use wcs_protocol::{parse_fn, ParseOptions, WcsParser, XmlDocument};

#[test]
fn test_coverage_description_golden() {
    let parsed = WcsParser::new()
        .parse(fixtures::COVERAGE_DESCRIPTION)
        .unwrap();
    let cd = parsed.into_coverage_description().unwrap();

    assert_eq!(cd.coverage_id.as_deref(), Some("global_ndvi"));
    assert_eq!(cd.dimensions, Some(2));

    let bounds = cd.bounds.as_ref().unwrap();
    assert_eq!(
        bounds.projection.as_deref(),
        Some("http://www.opengis.net/def/crs/EPSG/0/4326")
    );
    assert_eq!(bounds.lower.as_deref(), Some(&[-180.0, -90.0][..]));
    assert_eq!(bounds.upper.as_deref(), Some(&[180.0, 90.0][..]));

    let envelope = cd.envelope.as_ref().unwrap();
    assert_eq!(envelope.low.as_deref(), Some(&[0, 0][..]));
    assert_eq!(envelope.high.as_deref(), Some(&[719, 359][..]));

    assert_eq!(cd.size, Some(vec![720, 360]));
    assert_eq!(cd.origin, Some(vec![-180.0, 90.0]));
    assert_eq!(
        cd.offset_vectors,
        Some(vec![vec![0.5, 0.0], vec![0.0, -0.5]])
    );
    assert_slice_approx_eq!(cd.resolution.as_deref().unwrap(), &[0.5, -0.5], 1e-12);

    assert_eq!(cd.coverage_subtype.as_deref(), Some("RectifiedGridCoverage"));
    assert_eq!(cd.native_format.as_deref(), Some("image/tiff"));
    assert!(cd.footprint.is_none());
    assert!(cd.time_period.is_none());
}

#[test]
fn test_coverage_description_range_type() {
    let cd = WcsParser::new()
        .parse(fixtures::COVERAGE_DESCRIPTION)
        .unwrap()
        .into_coverage_description()
        .unwrap();

    assert_eq!(cd.band_names(), vec!["ndvi", "quality"]);
    let fields = cd.range_type.unwrap();

    let ndvi = &fields[0];
    assert_eq!(
        ndvi.description.as_deref(),
        Some("Normalized difference vegetation index")
    );
    assert_eq!(ndvi.uom.as_deref(), Some("1"));
    assert_eq!(
        ndvi.nil_values,
        vec![NilValue {
            value: Some(-9999),
            reason: Some("http://www.opengis.net/def/nil/OGC/0/unknown".to_string()),
        }]
    );
    assert_eq!(ndvi.allowed_values, vec![-1.0, 1.0]);
    assert_eq!(ndvi.significant_figures, Some(4));

    let quality = &fields[1];
    assert!(quality.description.is_none());
    assert_eq!(quality.uom.as_deref(), Some("W.m-2.Sr-1"));
    assert!(quality.nil_values.is_empty());
    assert!(quality.allowed_values.is_empty());
    assert!(quality.significant_figures.is_none());
}

#[test]
fn test_coverage_descriptions_dispatch_children() {
    let descriptions = WcsParser::new()
        .parse(fixtures::COVERAGE_DESCRIPTIONS)
        .unwrap()
        .into_coverage_descriptions()
        .unwrap()
        .coverage_descriptions
        .unwrap();

    assert_eq!(descriptions.len(), 2);
    assert_eq!(descriptions[0].coverage_id.as_deref(), Some("scene_2020_06_01"));
    assert_eq!(descriptions[0].size, Some(vec![200, 200]));
    assert_approx_eq!(descriptions[0].resolution.as_ref().unwrap()[0], 0.01, 1e-12);

    // Referenceable grid: limits and dimension, no origin or offsets.
    let swath = &descriptions[1];
    assert_eq!(swath.dimensions, Some(2));
    assert_eq!(swath.size, Some(vec![100, 50]));
    assert!(swath.origin.is_none());
    assert_eq!(swath.offset_vectors, Some(vec![]));
    assert_eq!(swath.resolution, Some(vec![]));
    // Core parsers ignore EO metadata.
    assert!(swath.footprint.is_none());
}

#[test]
fn test_capabilities() {
    let caps = WcsParser::new()
        .parse(fixtures::CAPABILITIES)
        .unwrap()
        .into_capabilities()
        .unwrap();

    let si = caps.service_identification.as_ref().unwrap();
    assert_eq!(si.title.as_deref(), Some("Test WCS"));
    assert_eq!(si.abstract_text.as_deref(), Some("Coverages for testing"));
    assert_eq!(si.keywords, Some(vec!["raster".to_string(), "EO".to_string()]));
    assert_eq!(si.service_type.as_deref(), Some("OGC WCS"));
    assert_eq!(si.service_type_version.as_deref(), Some("2.0.1"));
    assert_eq!(si.profiles.as_ref().map(Vec::len), Some(2));
    assert_eq!(si.fees.as_deref(), Some("None"));

    let sp = caps.service_provider.as_ref().unwrap();
    assert_eq!(sp.provider_name.as_deref(), Some("Example Agency"));
    assert_eq!(sp.provider_site.as_deref(), Some("http://example.org/"));
    assert_eq!(sp.individual_name.as_deref(), Some("Jane Doe"));
    assert_eq!(sp.role.as_deref(), Some("pointOfContact"));
    let contact = sp.contact_info.as_ref().unwrap();
    assert_eq!(
        contact.phone.as_ref().and_then(|p| p.facsimile.as_deref()),
        Some("+1 555 0101")
    );
    let address = contact.address.as_ref().unwrap();
    assert_eq!(address.city.as_deref(), Some("Springfield"));
    assert_eq!(address.electronic_mail_address.as_deref(), Some("ops@example.org"));
    assert_eq!(contact.online_resource.as_deref(), Some("http://example.org/contact"));
    assert_eq!(contact.hours_of_service.as_deref(), Some("24/7"));

    let sm = caps.service_metadata.as_ref().unwrap();
    assert_eq!(
        sm.formats_supported,
        Some(vec!["image/tiff".to_string(), "image/png".to_string()])
    );
    assert_eq!(sm.crss_supported.as_ref().map(Vec::len), Some(2));
    assert_eq!(sm.interpolations_supported.as_ref().map(Vec::len), Some(1));

    let get_caps = caps.operation("GetCapabilities").unwrap();
    assert_eq!(get_caps.get_url.as_deref(), Some("http://example.org/wcs?"));
    assert_eq!(get_caps.post_url.as_deref(), Some("http://example.org/wcs"));
    assert!(caps.operation("GetCoverage").unwrap().post_url.is_none());
    assert_eq!(caps.operations.as_ref().map(Vec::len), Some(4));

    assert_eq!(caps.coverage_ids(), vec!["global_ndvi", "scene_2020_06_01"]);
    // Dataset series need the EO-WCS extension.
    assert!(caps.contents.unwrap().dataset_series.is_none());
}

#[test]
fn test_minimal_capabilities_degrade_to_empty() {
    let caps = WcsParser::new()
        .parse(fixtures::CAPABILITIES_MINIMAL)
        .unwrap()
        .into_capabilities()
        .unwrap();

    assert_eq!(
        caps.service_identification.as_ref().unwrap().title.as_deref(),
        Some("Bare")
    );
    assert_eq!(caps.operations, Some(vec![]));
    assert!(caps.coverage_ids().is_empty());
    let provider = caps.service_provider.unwrap();
    assert!(provider.provider_name.is_none());
}

#[test]
fn test_exception_report_returned_by_default() {
    let parsed = WcsParser::new().parse(fixtures::EXCEPTION_REPORT).unwrap();
    let report = parsed.into_exception_report().unwrap();

    assert_eq!(report.code.as_deref(), Some("InvalidParameterValue"));
    assert_eq!(report.locator.as_deref(), Some("subset"));
    assert_eq!(
        report.text.as_deref(),
        Some("Subset x(200,300) is outside the coverage extent")
    );
}

#[test]
fn test_exception_report_thrown_on_request() {
    let err = WcsParser::new()
        .parse_with(fixtures::EXCEPTION_REPORT, ParseOptions::throw_on_exception())
        .unwrap_err();

    match err {
        WcsError::ServiceException { code, locator, text } => {
            assert_eq!(code, "InvalidParameterValue");
            assert_eq!(locator.as_deref(), Some("subset"));
            assert!(text.contains("outside the coverage extent"));
        }
        other => panic!("expected service exception, got {other:?}"),
    }
}

#[test]
fn test_parser_level_default_options() {
    let parser = WcsParser::with_options(ParseOptions::throw_on_exception());
    assert!(parser.parse(fixtures::EXCEPTION_REPORT).unwrap_err().is_service_exception());

    // Other documents pass through untouched.
    assert!(parser.parse(fixtures::COVERAGE_DESCRIPTION).is_ok());
}

#[test]
fn test_unknown_root_fails() {
    let err = WcsParser::new().parse(fixtures::UNKNOWN_ROOT).unwrap_err();
    assert!(matches!(err, WcsError::NoParserRegistered(ref tag) if tag == "Bar"));
}

#[test]
fn test_malformed_xml_fails() {
    let err = WcsParser::new()
        .parse("<wcs:Capabilities xmlns:wcs=\"http://www.opengis.net/wcs/2.0\">")
        .unwrap_err();
    assert!(matches!(err, WcsError::Xml(_)));
}

#[test]
fn test_parse_prebuilt_document() {
    let document = XmlDocument::parse(fixtures::COVERAGE_DESCRIPTION).unwrap();
    let parser = WcsParser::new();
    assert_eq!(
        parser.parse_document(&document).unwrap(),
        parser.parse(fixtures::COVERAGE_DESCRIPTION).unwrap()
    );
}

#[test]
fn test_rectified_grid_coverage_reuses_description_parser() {
    let xml = fixtures::COVERAGE_DESCRIPTION
        .replacen("<wcs:CoverageDescription", "<gmlcov:RectifiedGridCoverage", 1)
        .replace("</wcs:CoverageDescription>", "</gmlcov:RectifiedGridCoverage>");
    let cd = WcsParser::new()
        .parse(&xml)
        .unwrap()
        .into_coverage_description()
        .unwrap();
    assert_eq!(cd.size, Some(vec![720, 360]));
}

#[test]
fn test_later_registration_overrides_leaf() {
    let mut parser = WcsParser::new();
    parser.registry_mut().register_fn(
        "CoverageDescription",
        parse_fn(|_, _| {
            Ok(Parsed::CoverageDescription(wcs_common::CoverageDescription {
                native_format: Some("image/png".to_string()),
                ..Default::default()
            }))
        }),
    );

    let cd = parser
        .parse(fixtures::COVERAGE_DESCRIPTION)
        .unwrap()
        .into_coverage_description()
        .unwrap();
    assert_eq!(cd.native_format.as_deref(), Some("image/png"));
    // Everything else survives the merge.
    assert_eq!(cd.coverage_id.as_deref(), Some("global_ndvi"));
    assert_eq!(cd.size, Some(vec![720, 360]));
}

#[test]
fn test_oversized_grid_extent_does_not_panic() {
    let xml = fixtures::COVERAGE_DESCRIPTION.replace(
        "<gml:high>719 359</gml:high>",
        "<gml:high>9223372036854775807 359</gml:high>",
    );
    let cd = WcsParser::new()
        .parse(&xml)
        .unwrap()
        .into_coverage_description()
        .unwrap();

    let envelope = cd.envelope.as_ref().unwrap();
    assert_eq!(envelope.high.as_deref(), Some(&[i64::MAX, 359][..]));
    assert_eq!(cd.size, Some(vec![360]));
    assert_eq!(cd.coverage_id.as_deref(), Some("global_ndvi"));
}

#[test]
fn test_parsers_for_one_tag_run_in_registration_order() {
    let mut parser = WcsParser::new();
    for format in ["image/png", "image/jpeg"] {
        parser.registry_mut().register_fn(
            "CoverageDescription",
            parse_fn(move |_, _| {
                Ok(Parsed::CoverageDescription(wcs_common::CoverageDescription {
                    native_format: Some(format.to_string()),
                    ..Default::default()
                }))
            }),
        );
    }

    assert_eq!(parser.registry().parsers_for("CoverageDescription"), 3);
    let cd = parser
        .parse(fixtures::COVERAGE_DESCRIPTION)
        .unwrap()
        .into_coverage_description()
        .unwrap();
    assert_eq!(cd.native_format.as_deref(), Some("image/jpeg"));
}
