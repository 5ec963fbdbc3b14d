//! Core WCS 2.0 response parsers and the parsing entry point.

use tracing::{debug, warn};

use wcs_common::values::{non_empty, parse_float_list, parse_int, parse_int_list};
use wcs_common::{
    Address, Bounds, Capabilities, ContactInfo, Contents, CoverageDescription,
    CoverageDescriptions, CoverageSummary, ExceptionReport, GridEnvelope, NilValue, Operation,
    Parsed, Phone, RangeField, ServiceIdentification, ServiceMetadata, ServiceProvider, WcsResult,
};

use crate::namespaces::CORE;
use crate::registry::{parse_fn, ParseContext, ParseOptions, ParserExtension, ParserRegistry};
use crate::xml::{XmlDocument, XmlElement};
use crate::xpath::NodeAccess;

const RECTIFIED: &str = "gml:domainSet/gml:RectifiedGrid";
const REFERENCEABLE: &str = "gml:domainSet/gml:ReferenceableGrid";

fn access() -> NodeAccess<'static> {
    NodeAccess::new(&CORE)
}

/// Register the core parsers: `Capabilities`, `ExceptionReport`,
/// `CoverageDescriptions`, `CoverageDescription` and
/// `RectifiedGridCoverage`, in that order.
pub fn register_core(registry: &mut ParserRegistry<Parsed>) {
    registry.register_all([
        ("Capabilities", parse_fn(parse_capabilities)),
        ("ExceptionReport", parse_fn(parse_exception_report)),
        ("CoverageDescriptions", parse_fn(parse_coverage_descriptions)),
        ("CoverageDescription", parse_fn(parse_coverage_description)),
        ("RectifiedGridCoverage", parse_fn(parse_coverage_description)),
    ]);
}

/// Parses WCS responses into [`Parsed`] documents.
///
/// Owns a registry preloaded with the core parsers. Extensions are
/// installed afterwards and run after the core parsers for shared tags.
#[derive(Debug)]
pub struct WcsParser {
    registry: ParserRegistry<Parsed>,
}

impl Default for WcsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WcsParser {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser whose parses default to `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        let mut registry = ParserRegistry::with_defaults(options);
        register_core(&mut registry);
        Self { registry }
    }

    /// Install an extension on top of everything installed so far.
    pub fn install<E>(&mut self, extension: &E) -> &mut Self
    where
        E: ParserExtension<Parsed> + ?Sized,
    {
        self.registry.install(extension);
        self
    }

    /// Builder-style [`WcsParser::install`].
    pub fn with_extension<E>(mut self, extension: &E) -> Self
    where
        E: ParserExtension<Parsed> + ?Sized,
    {
        self.registry.install(extension);
        self
    }

    pub fn registry(&self) -> &ParserRegistry<Parsed> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ParserRegistry<Parsed> {
        &mut self.registry
    }

    /// Parse a raw XML response with the default options.
    pub fn parse(&self, xml: &str) -> WcsResult<Parsed> {
        self.parse_with(xml, self.registry.defaults())
    }

    pub fn parse_with(&self, xml: &str, options: ParseOptions) -> WcsResult<Parsed> {
        let document = XmlDocument::parse(xml)?;
        self.parse_document_with(&document, options)
    }

    /// Parse an already built document with the default options.
    pub fn parse_document(&self, document: &XmlDocument) -> WcsResult<Parsed> {
        self.parse_document_with(document, self.registry.defaults())
    }

    /// Dispatch on the local name of the document element.
    ///
    /// The document is always parsed in full; with `throw_on_exception` an
    /// exception report is then returned as `Err(ServiceException)`.
    pub fn parse_document_with(
        &self,
        document: &XmlDocument,
        options: ParseOptions,
    ) -> WcsResult<Parsed> {
        let root = document.root();
        debug!(tag = root.local_name(), "Parsing WCS response");

        let parsed = self
            .registry
            .dispatch_with(root.local_name(), root, options)?;

        if options.throw_on_exception {
            parsed.into_result()
        } else {
            Ok(parsed)
        }
    }
}

/// Parser for `ows:ExceptionReport`, reading the first `ows:Exception`.
pub fn parse_exception_report(_: &ParseContext<'_, Parsed>, node: &XmlElement) -> WcsResult<Parsed> {
    let xp = access();
    let report = match xp.node(node, "ows:Exception")? {
        Some(exception) => ExceptionReport {
            code: exception.attribute("exceptionCode").map(str::to_string),
            locator: exception.attribute("locator").map(str::to_string),
            text: non_empty(xp.text(exception, "ows:ExceptionText/text()")?),
        },
        None => ExceptionReport::default(),
    };
    Ok(Parsed::ExceptionReport(report))
}

/// Parser for `wcs:Capabilities`.
pub fn parse_capabilities(_: &ParseContext<'_, Parsed>, node: &XmlElement) -> WcsResult<Parsed> {
    let xp = access();
    let text = |path: &str| -> WcsResult<Option<String>> { Ok(non_empty(xp.text(node, path)?)) };

    let service_identification = ServiceIdentification {
        title: text("ows:ServiceIdentification/ows:Title/text()")?,
        abstract_text: text("ows:ServiceIdentification/ows:Abstract/text()")?,
        keywords: Some(xp.texts(node, "ows:ServiceIdentification/ows:Keywords/ows:Keyword/text()")?),
        service_type: text("ows:ServiceIdentification/ows:ServiceType/text()")?,
        service_type_version: text("ows:ServiceIdentification/ows:ServiceTypeVersion/text()")?,
        profiles: Some(xp.texts(node, "ows:ServiceIdentification/ows:Profile/text()")?),
        fees: text("ows:ServiceIdentification/ows:Fees/text()")?,
        access_constraints: text("ows:ServiceIdentification/ows:AccessConstraints/text()")?,
    };

    let service_provider = match xp.node(node, "ows:ServiceProvider")? {
        Some(provider) => parse_service_provider(&xp, provider)?,
        None => ServiceProvider::default(),
    };

    let service_metadata = ServiceMetadata {
        formats_supported: Some(xp.texts(node, "wcs:ServiceMetadata/wcs:formatSupported/text()")?),
        crss_supported: Some(xp.texts(
            node,
            "wcs:ServiceMetadata/wcs:Extension/crs:CrsMetadata/crs:crsSupported/text()",
        )?),
        interpolations_supported: Some(xp.texts(
            node,
            "wcs:ServiceMetadata/wcs:Extension/int:InterpolationMetadata/int:InterpolationSupported/text()",
        )?),
    };

    let operations = xp
        .nodes(node, "ows:OperationsMetadata/ows:Operation")?
        .into_iter()
        .map(|op| {
            Ok(Operation {
                name: op.attribute("name").map(str::to_string),
                get_url: non_empty(xp.text(op, "ows:DCP/ows:HTTP/ows:Get/@xlink:href")?),
                post_url: non_empty(xp.text(op, "ows:DCP/ows:HTTP/ows:Post/@xlink:href")?),
            })
        })
        .collect::<WcsResult<Vec<_>>>()?;

    let coverages = xp
        .nodes(node, "wcs:Contents/wcs:CoverageSummary")?
        .into_iter()
        .map(|summary| {
            Ok(CoverageSummary {
                coverage_id: non_empty(xp.text(summary, "wcs:CoverageId/text()")?),
                coverage_subtype: non_empty(xp.text(summary, "wcs:CoverageSubtype/text()")?),
            })
        })
        .collect::<WcsResult<Vec<_>>>()?;

    Ok(Parsed::Capabilities(Capabilities {
        service_identification: Some(service_identification),
        service_provider: Some(service_provider),
        service_metadata: Some(service_metadata),
        operations: Some(operations),
        contents: Some(Contents {
            coverages: Some(coverages),
            dataset_series: None,
        }),
    }))
}

fn parse_service_provider(xp: &NodeAccess<'_>, provider: &XmlElement) -> WcsResult<ServiceProvider> {
    let text = |path: &str| -> WcsResult<Option<String>> { Ok(non_empty(xp.text(provider, path)?)) };
    let contact = "ows:ServiceContact/ows:ContactInfo";

    Ok(ServiceProvider {
        provider_name: text("ows:ProviderName/text()")?,
        provider_site: text("ows:ProviderSite/@xlink:href")?,
        individual_name: text("ows:ServiceContact/ows:IndividualName/text()")?,
        position_name: text("ows:ServiceContact/ows:PositionName/text()")?,
        contact_info: Some(ContactInfo {
            phone: Some(Phone {
                voice: text(&format!("{contact}/ows:Phone/ows:Voice/text()"))?,
                facsimile: text(&format!("{contact}/ows:Phone/ows:Facsimile/text()"))?,
            }),
            address: Some(Address {
                delivery_point: text(&format!("{contact}/ows:Address/ows:DeliveryPoint/text()"))?,
                city: text(&format!("{contact}/ows:Address/ows:City/text()"))?,
                administrative_area: text(&format!(
                    "{contact}/ows:Address/ows:AdministrativeArea/text()"
                ))?,
                postal_code: text(&format!("{contact}/ows:Address/ows:PostalCode/text()"))?,
                country: text(&format!("{contact}/ows:Address/ows:Country/text()"))?,
                electronic_mail_address: text(&format!(
                    "{contact}/ows:Address/ows:ElectronicMailAddress/text()"
                ))?,
            }),
            online_resource: text(&format!("{contact}/ows:OnlineResource/@xlink:href"))?,
            hours_of_service: text(&format!("{contact}/ows:HoursOfService/text()"))?,
            contact_instructions: text(&format!("{contact}/ows:ContactInstructions/text()"))?,
        }),
        role: text("ows:ServiceContact/ows:Role/text()")?,
    })
}

/// Parser for `wcs:CoverageDescriptions`: dispatches every child
/// `wcs:CoverageDescription` through the registry.
pub fn parse_coverage_descriptions(
    ctx: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let mut descriptions = Vec::new();
    for child in access().nodes(node, "wcs:CoverageDescription")? {
        match ctx.dispatch_node(child)?.into_coverage_description() {
            Some(description) => descriptions.push(description),
            None => warn!(
                tag = child.local_name(),
                "Nested parse did not yield a coverage description"
            ),
        }
    }

    Ok(Parsed::CoverageDescriptions(CoverageDescriptions {
        coverage_descriptions: Some(descriptions),
    }))
}

/// Parser for `wcs:CoverageDescription` (and `RectifiedGridCoverage`).
pub fn parse_coverage_description(
    _: &ParseContext<'_, Parsed>,
    node: &XmlElement,
) -> WcsResult<Parsed> {
    let xp = access();
    let grid_text = |suffix: &str| -> WcsResult<String> {
        xp.text(
            node,
            [
                format!("{RECTIFIED}/{suffix}").as_str(),
                format!("{REFERENCEABLE}/{suffix}").as_str(),
            ],
        )
    };

    let low = parse_int_list(&grid_text("gml:limits/gml:GridEnvelope/gml:low/text()")?, None);
    let high = parse_int_list(&grid_text("gml:limits/gml:GridEnvelope/gml:high/text()")?, None);
    let size = grid_size(&low, &high);

    let pos = xp.text(node, format!("{RECTIFIED}/gml:origin/gml:Point/gml:pos/text()"))?;
    let origin = if pos.is_empty() {
        None
    } else {
        Some(parse_float_list(&pos, None))
    };

    let offset_vectors: Vec<Vec<f64>> = xp
        .texts(node, format!("{RECTIFIED}/gml:offsetVector/text()"))?
        .iter()
        .map(|v| parse_float_list(v, None))
        .collect();
    let resolution = axis_resolution(&offset_vectors);

    let dimensions = parse_int(&grid_text("@dimension")?).and_then(|d| u32::try_from(d).ok());

    let range_type = xp
        .nodes(node, "gmlcov:rangeType/swe:DataRecord/swe:field")?
        .into_iter()
        .map(|field| parse_range_field(&xp, field))
        .collect::<WcsResult<Vec<_>>>()?;

    Ok(Parsed::CoverageDescription(CoverageDescription {
        coverage_id: non_empty(xp.text(node, "wcs:CoverageId/text()")?),
        dimensions,
        bounds: Some(Bounds {
            projection: non_empty(xp.text(node, "gml:boundedBy/gml:Envelope/@srsName")?),
            lower: Some(parse_float_list(
                &xp.text(node, "gml:boundedBy/gml:Envelope/gml:lowerCorner/text()")?,
                None,
            )),
            upper: Some(parse_float_list(
                &xp.text(node, "gml:boundedBy/gml:Envelope/gml:upperCorner/text()")?,
                None,
            )),
        }),
        envelope: Some(GridEnvelope {
            low: Some(low),
            high: Some(high),
        }),
        size: Some(size),
        origin,
        offset_vectors: Some(offset_vectors),
        resolution: Some(resolution),
        range_type: Some(range_type),
        coverage_subtype: non_empty(xp.text(node, "wcs:ServiceParameters/wcs:CoverageSubtype/text()")?),
        native_format: non_empty(xp.text(node, "wcs:ServiceParameters/wcs:nativeFormat/text()")?),
        footprint: None,
        time_period: None,
    }))
}

fn parse_range_field(xp: &NodeAccess<'_>, field: &XmlElement) -> WcsResult<RangeField> {
    let nil_values = xp
        .nodes(field, "swe:Quantity/swe:nilValues/swe:NilValues/swe:nilValue")?
        .into_iter()
        .map(|nil| NilValue {
            value: parse_int(&nil.text_content()),
            reason: nil.attribute("reason").map(str::to_string),
        })
        .collect();

    Ok(RangeField {
        name: field.attribute("name").map(str::to_string),
        description: non_empty(xp.text(field, "swe:Quantity/swe:description/text()")?),
        uom: non_empty(xp.text(field, "swe:Quantity/swe:uom/@code")?),
        nil_values,
        allowed_values: parse_float_list(
            &xp.text(field, "swe:Quantity/swe:constraint/swe:AllowedValues/swe:interval/text()")?,
            None,
        ),
        significant_figures: parse_int(&xp.text(
            field,
            "swe:Quantity/swe:constraint/swe:AllowedValues/swe:significantFigures/text()",
        )?)
        .and_then(|n| u32::try_from(n).ok()),
    })
}

/// Grid cells per axis, `high + 1 - low`. Axes whose extent does not fit
/// in an `i64` are skipped.
pub fn grid_size(low: &[i64], high: &[i64]) -> Vec<i64> {
    low.iter()
        .zip(high)
        .filter_map(|(l, h)| {
            let size = h.checked_add(1).and_then(|v| v.checked_sub(*l));
            if size.is_none() {
                warn!(low = l, high = h, "Grid extent overflows, axis skipped");
            }
            size
        })
        .collect()
}

/// Simplified per-axis resolution: for axis `i`, every offset vector with a
/// non-zero `i`-th component contributes that component.
///
/// Assumes axis-aligned offset vectors; rotated grids yield more values than
/// axes.
pub fn axis_resolution(offset_vectors: &[Vec<f64>]) -> Vec<f64> {
    let mut resolution = Vec::new();
    for i in 0..offset_vectors.len() {
        for vector in offset_vectors {
            if let Some(&component) = vector.get(i) {
                if component != 0.0 {
                    resolution.push(component);
                }
            }
        }
    }
    resolution
}
