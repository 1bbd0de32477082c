//! Warranty and service-contract coverage summary per serial number.

use super::{Pagination, SupportClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Response of the coverage summary endpoint.
///
/// The vendor omits fields freely, so every record decodes missing values as
/// empty strings/lists rather than failing.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CoverageSummary {
  pub pagination_response_record: Pagination,
  pub serial_numbers: Vec<CoverageRecord>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CoverageRecord {
  pub base_pid_list: Vec<BasePid>,
  pub contract_site_customer_name: String,
  pub contract_site_address1: String,
  pub contract_site_city: String,
  pub contract_site_state_province: String,
  pub contract_site_country: String,
  pub covered_product_line_end_date: String,
  pub id: String,
  /// "YES" or "NO".
  pub is_covered: String,
  pub orderable_pid_list: Vec<OrderablePid>,
  pub parent_sr_no: String,
  pub service_contract_number: String,
  pub service_line_descr: String,
  pub sr_no: String,
  pub warranty_end_date: String,
  pub warranty_type: String,
  pub warranty_type_description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BasePid {
  pub base_pid: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OrderablePid {
  pub item_description: String,
  pub item_position: String,
  pub item_type: String,
  pub orderable_pid: String,
  pub pillar_code: String,
}

impl CoverageRecord {
  #[must_use]
  pub fn is_covered(&self) -> bool {
    self.is_covered.eq_ignore_ascii_case("yes")
  }

  /// City, state and country of the contract site, skipping blanks.
  #[must_use]
  pub fn site_location(&self) -> String {
    [
      self.contract_site_city.as_str(),
      self.contract_site_state_province.as_str(),
      self.contract_site_country.as_str(),
    ]
    .iter()
    .filter(|part| !part.trim().is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ")
  }
}

impl SupportClient {
  /// Fetches the coverage summary for `serial`.
  ///
  /// # Errors
  ///
  /// Fails on network errors, non-2xx answers, or a body that does not match
  /// [`CoverageSummary`].
  pub async fn coverage_summary(
    &self,
    serial: &str,
    token: &str,
  ) -> Result<CoverageSummary> {
    self
      .get_json(&self.endpoints.coverage_url, serial, token)
      .await
  }
}
