//! Parsed `wcs:Capabilities` documents.

use serde::{Deserialize, Serialize};

use crate::merge::merge_fields;
use crate::series::DatasetSeriesDescription;

/// Parsed GetCapabilities response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_identification: Option<ServiceIdentification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<ServiceProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_metadata: Option<ServiceMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Contents>,
}

merge_fields!(
    Capabilities,
    leaves: [operations],
    nested: [service_identification, service_provider, service_metadata, contents]
);

impl Capabilities {
    /// Look up an advertised operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations
            .as_deref()?
            .iter()
            .find(|op| op.name.as_deref() == Some(name))
    }

    /// Identifiers of all advertised coverages, in document order.
    pub fn coverage_ids(&self) -> Vec<&str> {
        self.contents
            .as_ref()
            .and_then(|c| c.coverages.as_deref())
            .unwrap_or_default()
            .iter()
            .filter_map(|c| c.coverage_id.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIdentification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_constraints: Option<String>,
}

merge_fields!(
    ServiceIdentification,
    leaves: [
        title,
        abstract_text,
        keywords,
        service_type,
        service_type_version,
        profiles,
        fees,
        access_constraints,
    ],
    nested: []
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

merge_fields!(
    ServiceProvider,
    leaves: [provider_name, provider_site, individual_name, position_name, role],
    nested: [contact_info]
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_instructions: Option<String>,
}

merge_fields!(
    ContactInfo,
    leaves: [online_resource, hours_of_service, contact_instructions],
    nested: [phone, address]
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facsimile: Option<String>,
}

merge_fields!(Phone, leaves: [voice, facsimile], nested: []);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_mail_address: Option<String>,
}

merge_fields!(
    Address,
    leaves: [
        delivery_point,
        city,
        administrative_area,
        postal_code,
        country,
        electronic_mail_address,
    ],
    nested: []
);

/// Formats, CRSs and interpolations the service supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats_supported: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crss_supported: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolations_supported: Option<Vec<String>>,
}

merge_fields!(
    ServiceMetadata,
    leaves: [formats_supported, crss_supported, interpolations_supported],
    nested: []
);

/// An `ows:Operation` with its HTTP endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
}

/// `wcs:Contents`. `dataset_series` is only filled when the EO-WCS
/// extension parsers are installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverages: Option<Vec<CoverageSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_series: Option<Vec<DatasetSeriesDescription>>,
}

merge_fields!(Contents, leaves: [coverages, dataset_series], nested: []);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub coverage_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_subtype: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::Merge;

    #[test]
    fn test_extension_contents_merge_alongside_coverages() {
        let mut core = Capabilities {
            contents: Some(Contents {
                coverages: Some(vec![CoverageSummary {
                    coverage_id: Some("C1".to_string()),
                    coverage_subtype: Some("RectifiedGridCoverage".to_string()),
                }]),
                dataset_series: None,
            }),
            ..Default::default()
        };

        core.merge(Capabilities {
            contents: Some(Contents {
                coverages: None,
                dataset_series: Some(vec![DatasetSeriesDescription {
                    dataset_series_id: Some("S1".to_string()),
                    time_period: None,
                }]),
            }),
            ..Default::default()
        });

        assert_eq!(core.coverage_ids(), vec!["C1"]);
        let contents = core.contents.unwrap();
        assert_eq!(contents.dataset_series.unwrap().len(), 1);
    }

    #[test]
    fn test_abstract_serializes_under_reserved_name() {
        let ident = ServiceIdentification {
            abstract_text: Some("text".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&ident).unwrap();
        assert_eq!(json["abstract"], "text");
    }
}
