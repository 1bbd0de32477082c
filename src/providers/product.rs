//! Catalog metadata for the product behind a serial number.

use super::{Pagination, SupportClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProductInfo {
  pub pagination_response_record: Pagination,
  pub product_list: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Product {
  pub id: String,
  pub sr_no: String,
  pub base_pid: String,
  pub orderable_pid: String,
  pub product_name: String,
  pub product_type: String,
  pub product_series: String,
  pub product_category: String,
  pub product_subcategory: String,
  pub release_date: String,
  pub orderable_status: String,
  pub dimensions: Dimensions,
  pub weight: String,
  pub form_factor: String,
  pub product_support_page: String,
  pub visio_stencil_url: String,
  pub rich_media_urls: RichMediaUrls,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Dimensions {
  /// e.g. "Inches (H x W x D)"
  pub dimensions_format: String,
  pub dimensions_value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RichMediaUrls {
  pub small_image_url: String,
  pub large_image_url: String,
}

impl Dimensions {
  /// `"<value> <format>"`, or `None` when the API sent no value.
  #[must_use]
  pub fn display(&self) -> Option<String> {
    let value = self.dimensions_value.trim();
    if value.is_empty() {
      return None;
    }
    let format = self.dimensions_format.trim();
    if format.is_empty() {
      Some(value.to_string())
    } else {
      Some(format!("{value} {format}"))
    }
  }
}

impl SupportClient {
  /// Fetches product information for `serial`.
  ///
  /// # Errors
  ///
  /// Fails on network errors, non-2xx answers, or a body that does not match
  /// [`ProductInfo`].
  pub async fn product_info(
    &self,
    serial: &str,
    token: &str,
  ) -> Result<ProductInfo> {
    self.get_json(&self.endpoints.product_url, serial, token).await
  }
}
