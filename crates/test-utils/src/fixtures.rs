//! XML response fixtures.
//!
//! Trimmed but schema-shaped responses as returned by a WCS 2.0 / EO-WCS
//! server. The coverage descriptions share one grid: a global 720x360
//! raster at 0.5 degree resolution.

/// `wcs:Capabilities` with the EO-WCS dataset series extension.
pub const CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wcs:Capabilities xmlns:wcs="http://www.opengis.net/wcs/2.0"
    xmlns:ows="http://www.opengis.net/ows/2.0"
    xmlns:xlink="http://www.w3.org/1999/xlink"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:crs="http://www.opengis.net/wcs/crs/1.0"
    xmlns:int="http://www.opengis.net/wcs/interpolation/1.0"
    xmlns:wcseo="http://www.opengis.net/wcs/wcseo/1.0"
    version="2.0.1">
  <ows:ServiceIdentification>
    <ows:Title>Test WCS</ows:Title>
    <ows:Abstract>Coverages for testing</ows:Abstract>
    <ows:Keywords>
      <ows:Keyword>raster</ows:Keyword>
      <ows:Keyword>EO</ows:Keyword>
    </ows:Keywords>
    <ows:ServiceType>OGC WCS</ows:ServiceType>
    <ows:ServiceTypeVersion>2.0.1</ows:ServiceTypeVersion>
    <ows:Profile>http://www.opengis.net/spec/WCS/2.0/conf/core</ows:Profile>
    <ows:Profile>http://www.opengis.net/spec/WCS_application-profile_earth-observation/1.0/conf/eowcs</ows:Profile>
    <ows:Fees>None</ows:Fees>
    <ows:AccessConstraints>None</ows:AccessConstraints>
  </ows:ServiceIdentification>
  <ows:ServiceProvider>
    <ows:ProviderName>Example Agency</ows:ProviderName>
    <ows:ProviderSite xlink:href="http://example.org/"/>
    <ows:ServiceContact>
      <ows:IndividualName>Jane Doe</ows:IndividualName>
      <ows:PositionName>Operator</ows:PositionName>
      <ows:ContactInfo>
        <ows:Phone>
          <ows:Voice>+1 555 0100</ows:Voice>
          <ows:Facsimile>+1 555 0101</ows:Facsimile>
        </ows:Phone>
        <ows:Address>
          <ows:DeliveryPoint>1 Main Street</ows:DeliveryPoint>
          <ows:City>Springfield</ows:City>
          <ows:AdministrativeArea>State</ows:AdministrativeArea>
          <ows:PostalCode>12345</ows:PostalCode>
          <ows:Country>Nowhere</ows:Country>
          <ows:ElectronicMailAddress>ops@example.org</ows:ElectronicMailAddress>
        </ows:Address>
        <ows:OnlineResource xlink:href="http://example.org/contact"/>
        <ows:HoursOfService>24/7</ows:HoursOfService>
        <ows:ContactInstructions>Email first</ows:ContactInstructions>
      </ows:ContactInfo>
      <ows:Role>pointOfContact</ows:Role>
    </ows:ServiceContact>
  </ows:ServiceProvider>
  <ows:OperationsMetadata>
    <ows:Operation name="GetCapabilities">
      <ows:DCP><ows:HTTP>
        <ows:Get xlink:href="http://example.org/wcs?"/>
        <ows:Post xlink:href="http://example.org/wcs"/>
      </ows:HTTP></ows:DCP>
    </ows:Operation>
    <ows:Operation name="DescribeCoverage">
      <ows:DCP><ows:HTTP><ows:Get xlink:href="http://example.org/wcs?"/></ows:HTTP></ows:DCP>
    </ows:Operation>
    <ows:Operation name="GetCoverage">
      <ows:DCP><ows:HTTP><ows:Get xlink:href="http://example.org/wcs?"/></ows:HTTP></ows:DCP>
    </ows:Operation>
    <ows:Operation name="DescribeEOCoverageSet">
      <ows:DCP><ows:HTTP><ows:Get xlink:href="http://example.org/wcs?"/></ows:HTTP></ows:DCP>
    </ows:Operation>
  </ows:OperationsMetadata>
  <wcs:ServiceMetadata>
    <wcs:formatSupported>image/tiff</wcs:formatSupported>
    <wcs:formatSupported>image/png</wcs:formatSupported>
    <wcs:Extension>
      <crs:CrsMetadata>
        <crs:crsSupported>http://www.opengis.net/def/crs/EPSG/0/4326</crs:crsSupported>
        <crs:crsSupported>http://www.opengis.net/def/crs/EPSG/0/3857</crs:crsSupported>
      </crs:CrsMetadata>
      <int:InterpolationMetadata>
        <int:InterpolationSupported>http://www.opengis.net/def/interpolation/OGC/1/nearest-neighbour</int:InterpolationSupported>
      </int:InterpolationMetadata>
    </wcs:Extension>
  </wcs:ServiceMetadata>
  <wcs:Contents>
    <wcs:CoverageSummary>
      <wcs:CoverageId>global_ndvi</wcs:CoverageId>
      <wcs:CoverageSubtype>RectifiedGridCoverage</wcs:CoverageSubtype>
    </wcs:CoverageSummary>
    <wcs:CoverageSummary>
      <wcs:CoverageId>scene_2020_06_01</wcs:CoverageId>
      <wcs:CoverageSubtype>RectifiedDataset</wcs:CoverageSubtype>
    </wcs:CoverageSummary>
    <wcs:Extension>
      <wcseo:DatasetSeriesSummary>
        <ows:WGS84BoundingBox>
          <ows:LowerCorner>-180 -90</ows:LowerCorner>
          <ows:UpperCorner>180 90</ows:UpperCorner>
        </ows:WGS84BoundingBox>
        <wcseo:DatasetSeriesId>scenes_2020</wcseo:DatasetSeriesId>
        <gml:TimePeriod gml:id="tp_scenes_2020">
          <gml:beginPosition>2020-01-01T00:00:00Z</gml:beginPosition>
          <gml:endPosition>2020-12-31T23:59:59Z</gml:endPosition>
        </gml:TimePeriod>
      </wcseo:DatasetSeriesSummary>
    </wcs:Extension>
  </wcs:Contents>
</wcs:Capabilities>
"#;

/// A minimal `wcs:Capabilities` from a server without optional sections.
pub const CAPABILITIES_MINIMAL: &str = r#"<wcs:Capabilities xmlns:wcs="http://www.opengis.net/wcs/2.0"
    xmlns:ows="http://www.opengis.net/ows/2.0">
  <ows:ServiceIdentification>
    <ows:Title>Bare</ows:Title>
  </ows:ServiceIdentification>
</wcs:Capabilities>"#;

/// A single `wcs:CoverageDescription` with known grid geometry.
///
/// Bounds `[-180, -90]`..`[180, 90]`, grid `0 0`..`719 359`, offset
/// vectors `0.5 0` and `0 -0.5`.
pub const COVERAGE_DESCRIPTION: &str = r#"<wcs:CoverageDescription
    xmlns:wcs="http://www.opengis.net/wcs/2.0"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:gmlcov="http://www.opengis.net/gmlcov/1.0"
    xmlns:swe="http://www.opengis.net/swe/2.0"
    gml:id="global_ndvi">
  <gml:boundedBy>
    <gml:Envelope srsName="http://www.opengis.net/def/crs/EPSG/0/4326" axisLabels="lat long" uomLabels="deg deg" srsDimension="2">
      <gml:lowerCorner>-180 -90</gml:lowerCorner>
      <gml:upperCorner>180 90</gml:upperCorner>
    </gml:Envelope>
  </gml:boundedBy>
  <wcs:CoverageId>global_ndvi</wcs:CoverageId>
  <gml:domainSet>
    <gml:RectifiedGrid dimension="2" gml:id="global_ndvi_grid">
      <gml:limits>
        <gml:GridEnvelope>
          <gml:low>0 0</gml:low>
          <gml:high>719 359</gml:high>
        </gml:GridEnvelope>
      </gml:limits>
      <gml:axisLabels>x y</gml:axisLabels>
      <gml:origin>
        <gml:Point gml:id="global_ndvi_origin" srsName="http://www.opengis.net/def/crs/EPSG/0/4326">
          <gml:pos>-180 90</gml:pos>
        </gml:Point>
      </gml:origin>
      <gml:offsetVector srsName="http://www.opengis.net/def/crs/EPSG/0/4326">0.5 0</gml:offsetVector>
      <gml:offsetVector srsName="http://www.opengis.net/def/crs/EPSG/0/4326">0 -0.5</gml:offsetVector>
    </gml:RectifiedGrid>
  </gml:domainSet>
  <gmlcov:rangeType>
    <swe:DataRecord>
      <swe:field name="ndvi">
        <swe:Quantity definition="http://www.opengis.net/def/property/OGC/0/Radiance">
          <swe:description>Normalized difference vegetation index</swe:description>
          <swe:nilValues>
            <swe:NilValues>
              <swe:nilValue reason="http://www.opengis.net/def/nil/OGC/0/unknown">-9999</swe:nilValue>
            </swe:NilValues>
          </swe:nilValues>
          <swe:uom code="1"/>
          <swe:constraint>
            <swe:AllowedValues>
              <swe:interval>-1 1</swe:interval>
              <swe:significantFigures>4</swe:significantFigures>
            </swe:AllowedValues>
          </swe:constraint>
        </swe:Quantity>
      </swe:field>
      <swe:field name="quality">
        <swe:Quantity>
          <swe:uom code="W.m-2.Sr-1"/>
        </swe:Quantity>
      </swe:field>
    </swe:DataRecord>
  </gmlcov:rangeType>
  <wcs:ServiceParameters>
    <wcs:CoverageSubtype>RectifiedGridCoverage</wcs:CoverageSubtype>
    <wcs:nativeFormat>image/tiff</wcs:nativeFormat>
  </wcs:ServiceParameters>
</wcs:CoverageDescription>"#;

/// `wcs:CoverageDescriptions` with a rectified coverage carrying EO metadata
/// (current namespace) and a referenceable one carrying legacy EO metadata.
pub const COVERAGE_DESCRIPTIONS: &str = r#"<wcs:CoverageDescriptions
    xmlns:wcs="http://www.opengis.net/wcs/2.0"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:gmlcov="http://www.opengis.net/gmlcov/1.0"
    xmlns:swe="http://www.opengis.net/swe/2.0"
    xmlns:eop="http://www.opengis.net/eop/2.0"
    xmlns:om="http://www.opengis.net/om/2.0"
    xmlns:wcseo="http://www.opengis.net/wcs/wcseo/1.0"
    xmlns:wcseoold="http://www.opengis.net/wcseo/1.0">
  <wcs:CoverageDescription gml:id="scene_2020_06_01">
    <gml:boundedBy>
      <gml:Envelope srsName="http://www.opengis.net/def/crs/EPSG/0/4326">
        <gml:lowerCorner>10 40</gml:lowerCorner>
        <gml:upperCorner>12 42</gml:upperCorner>
      </gml:Envelope>
    </gml:boundedBy>
    <wcs:CoverageId>scene_2020_06_01</wcs:CoverageId>
    <gmlcov:metadata>
      <gmlcov:Extension>
        <wcseo:EOMetadata>
          <eop:EarthObservation gml:id="eop_scene_2020_06_01">
            <om:phenomenonTime>
              <gml:TimePeriod gml:id="tp_scene_2020_06_01">
                <gml:beginPosition>2020-06-01T10:00:00Z</gml:beginPosition>
                <gml:endPosition>2020-06-01T10:05:00Z</gml:endPosition>
              </gml:TimePeriod>
            </om:phenomenonTime>
            <om:featureOfInterest>
              <eop:Footprint gml:id="fp_scene_2020_06_01">
                <eop:multiExtentOf>
                  <gml:MultiSurface gml:id="ms_scene_2020_06_01">
                    <gml:surfaceMember>
                      <gml:Polygon gml:id="p_scene_2020_06_01">
                        <gml:exterior>
                          <gml:LinearRing>
                            <gml:posList>40 10 40 12 42 12 42 10 40 10</gml:posList>
                          </gml:LinearRing>
                        </gml:exterior>
                      </gml:Polygon>
                    </gml:surfaceMember>
                  </gml:MultiSurface>
                </eop:multiExtentOf>
              </eop:Footprint>
            </om:featureOfInterest>
          </eop:EarthObservation>
        </wcseo:EOMetadata>
      </gmlcov:Extension>
    </gmlcov:metadata>
    <gml:domainSet>
      <gml:RectifiedGrid dimension="2" gml:id="scene_grid">
        <gml:limits>
          <gml:GridEnvelope>
            <gml:low>0 0</gml:low>
            <gml:high>199 199</gml:high>
          </gml:GridEnvelope>
        </gml:limits>
        <gml:origin>
          <gml:Point gml:id="scene_origin">
            <gml:pos>10 42</gml:pos>
          </gml:Point>
        </gml:origin>
        <gml:offsetVector>0.01 0</gml:offsetVector>
        <gml:offsetVector>0 -0.01</gml:offsetVector>
      </gml:RectifiedGrid>
    </gml:domainSet>
    <gmlcov:rangeType>
      <swe:DataRecord>
        <swe:field name="red"><swe:Quantity><swe:uom code="W.m-2.Sr-1"/></swe:Quantity></swe:field>
        <swe:field name="nir"><swe:Quantity><swe:uom code="W.m-2.Sr-1"/></swe:Quantity></swe:field>
      </swe:DataRecord>
    </gmlcov:rangeType>
    <wcs:ServiceParameters>
      <wcs:CoverageSubtype>RectifiedDataset</wcs:CoverageSubtype>
      <wcs:nativeFormat>image/tiff</wcs:nativeFormat>
    </wcs:ServiceParameters>
  </wcs:CoverageDescription>
  <wcs:CoverageDescription gml:id="swath_2020_06_02">
    <wcs:CoverageId>swath_2020_06_02</wcs:CoverageId>
    <gmlcov:metadata>
      <wcseoold:EOMetadata>
        <eop:EarthObservation gml:id="eop_swath_2020_06_02">
          <om:phenomenonTime>
            <gml:TimePeriod gml:id="tp_swath_2020_06_02">
              <gml:beginPosition>2020-06-02T00:00:00</gml:beginPosition>
              <gml:endPosition>2020-06-02</gml:endPosition>
            </gml:TimePeriod>
          </om:phenomenonTime>
          <om:featureOfInterest>
            <eop:Footprint gml:id="fp_swath_2020_06_02">
              <eop:multiExtentOf>
                <gml:MultiSurface gml:id="ms_swath_2020_06_02">
                  <gml:surfaceMember>
                    <gml:Polygon gml:id="p_swath_2020_06_02">
                      <gml:exterior>
                        <gml:LinearRing>
                          <gml:posList>0 0 0 1 1 1 0 0</gml:posList>
                        </gml:LinearRing>
                      </gml:exterior>
                    </gml:Polygon>
                  </gml:surfaceMember>
                </gml:MultiSurface>
              </eop:multiExtentOf>
            </eop:Footprint>
          </om:featureOfInterest>
        </eop:EarthObservation>
      </wcseoold:EOMetadata>
    </gmlcov:metadata>
    <gml:domainSet>
      <gml:ReferenceableGrid dimension="2" gml:id="swath_grid">
        <gml:limits>
          <gml:GridEnvelope>
            <gml:low>0 0</gml:low>
            <gml:high>99 49</gml:high>
          </gml:GridEnvelope>
        </gml:limits>
      </gml:ReferenceableGrid>
    </gml:domainSet>
    <wcs:ServiceParameters>
      <wcs:CoverageSubtype>ReferenceableDataset</wcs:CoverageSubtype>
    </wcs:ServiceParameters>
  </wcs:CoverageDescription>
</wcs:CoverageDescriptions>"#;

/// `wcseo:EOCoverageSetDescription` with one coverage and one dataset series.
pub const EO_COVERAGE_SET_DESCRIPTION: &str = r#"<wcseo:EOCoverageSetDescription
    xmlns:wcs="http://www.opengis.net/wcs/2.0"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:gmlcov="http://www.opengis.net/gmlcov/1.0"
    xmlns:eop="http://www.opengis.net/eop/2.0"
    xmlns:om="http://www.opengis.net/om/2.0"
    xmlns:wcseo="http://www.opengis.net/wcs/wcseo/1.0"
    numberMatched="2" numberReturned="2">
  <wcs:CoverageDescriptions>
    <wcs:CoverageDescription gml:id="scene_2020_06_01">
      <wcs:CoverageId>scene_2020_06_01</wcs:CoverageId>
      <gmlcov:metadata>
        <wcseo:EOMetadata>
          <eop:EarthObservation gml:id="eop_scene_2020_06_01">
            <om:phenomenonTime>
              <gml:TimePeriod gml:id="tp_scene_2020_06_01">
                <gml:beginPosition>2020-06-01T10:00:00Z</gml:beginPosition>
                <gml:endPosition>2020-06-01T10:05:00Z</gml:endPosition>
              </gml:TimePeriod>
            </om:phenomenonTime>
          </eop:EarthObservation>
        </wcseo:EOMetadata>
      </gmlcov:metadata>
      <gml:domainSet>
        <gml:RectifiedGrid dimension="2" gml:id="scene_grid">
          <gml:limits>
            <gml:GridEnvelope>
              <gml:low>0 0</gml:low>
              <gml:high>199 199</gml:high>
            </gml:GridEnvelope>
          </gml:limits>
          <gml:offsetVector>0.01 0</gml:offsetVector>
          <gml:offsetVector>0 -0.01</gml:offsetVector>
        </gml:RectifiedGrid>
      </gml:domainSet>
    </wcs:CoverageDescription>
  </wcs:CoverageDescriptions>
  <wcseo:DatasetSeriesDescriptions>
    <wcseo:DatasetSeriesDescription gml:id="scenes_2020">
      <gml:boundedBy>
        <gml:Envelope srsName="http://www.opengis.net/def/crs/EPSG/0/4326">
          <gml:lowerCorner>-90 -180</gml:lowerCorner>
          <gml:upperCorner>90 180</gml:upperCorner>
        </gml:Envelope>
      </gml:boundedBy>
      <wcseo:DatasetSeriesId>scenes_2020</wcseo:DatasetSeriesId>
      <gml:TimePeriod gml:id="tp_scenes_2020">
        <gml:beginPosition>2020-01-01T00:00:00Z</gml:beginPosition>
        <gml:endPosition>2020-12-31T23:59:59Z</gml:endPosition>
      </gml:TimePeriod>
    </wcseo:DatasetSeriesDescription>
  </wcseo:DatasetSeriesDescriptions>
</wcseo:EOCoverageSetDescription>"#;

/// `wcseo:DatasetSeriesDescriptions` mixing current and legacy namespaces.
pub const DATASET_SERIES_DESCRIPTIONS: &str = r#"<wcseo:DatasetSeriesDescriptions
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:wcseo="http://www.opengis.net/wcs/wcseo/1.0"
    xmlns:wcseoold="http://www.opengis.net/wcseo/1.0">
  <wcseo:DatasetSeriesDescription gml:id="series_a">
    <wcseo:DatasetSeriesId>series_a</wcseo:DatasetSeriesId>
    <gml:TimePeriod gml:id="tp_a">
      <gml:beginPosition>2019-01-01T00:00:00Z</gml:beginPosition>
      <gml:endPosition>2019-06-30T00:00:00Z</gml:endPosition>
    </gml:TimePeriod>
  </wcseo:DatasetSeriesDescription>
  <wcseoold:DatasetSeriesDescription gml:id="series_b">
    <wcseoold:DatasetSeriesId>series_b</wcseoold:DatasetSeriesId>
    <gml:TimePeriod gml:id="tp_b">
      <gml:beginPosition>2019-07-01T00:00:00Z</gml:beginPosition>
      <gml:endPosition>not a date</gml:endPosition>
    </gml:TimePeriod>
  </wcseoold:DatasetSeriesDescription>
</wcseo:DatasetSeriesDescriptions>"#;

/// `ows:ExceptionReport` for an invalid subset.
pub const EXCEPTION_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ows:ExceptionReport xmlns:ows="http://www.opengis.net/ows/2.0" version="2.0.0" xml:lang="en">
  <ows:Exception exceptionCode="InvalidParameterValue" locator="subset">
    <ows:ExceptionText>Subset x(200,300) is outside the coverage extent</ows:ExceptionText>
  </ows:Exception>
</ows:ExceptionReport>"#;

/// A well-formed document no parser is registered for.
pub const UNKNOWN_ROOT: &str = r#"<foo:Bar xmlns:foo="urn:example:foo"><foo:Baz/></foo:Bar>"#;
