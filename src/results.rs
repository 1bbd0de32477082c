use crate::providers::coverage::{CoverageRecord, CoverageSummary};
use crate::providers::product::{Product, ProductInfo};
use crate::providers::Pagination;
use crate::settings::SettingsView;
use anyhow::{Context, Result};
use console::{style, Style};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Report {
  pub serial: String,
  pub coverage: CoverageSummary,
  pub product: ProductInfo,
}

/// Helper: coloured keys so the summary is easy to scan.
fn key(s: &str) -> console::StyledObject<&str> {
  style(s).bold().cyan()
}

/// Line buffer the human-readable report is rendered into.
#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
  fn push(&mut self, line: impl Into<String>) {
    self.0.push(line.into());
  }

  /// Section header ("🛡 Coverage") preceded by a blank line.
  fn header(&mut self, title: &str, emoji: &str) {
    self.push(String::new());
    self.push(format!(
      "{} {}",
      style(emoji).bold(),
      Style::new().bold().underlined().apply_to(title)
    ));
  }

  /// `label value`, skipped when the API left the value blank.
  fn field(&mut self, label: &str, value: &str) {
    if !value.trim().is_empty() {
      self.push(format!("  {} {}", key(label), value));
    }
  }

  fn pagination(&mut self, pagination: &Pagination) {
    if pagination.total_records > pagination.page_records {
      self.push(format!(
        "  {}",
        style(format!(
          "Showing page {} ({} of {} records)",
          pagination.page_index,
          pagination.page_records,
          pagination.total_records
        ))
        .dim()
      ));
    }
  }

  fn coverage_record(&mut self, record: &CoverageRecord) {
    self.push(String::new());
    self.field("Serial:", &record.sr_no);
    self.push(format!(
      "  {} {}",
      key("Covered:"),
      if record.is_covered() {
        style("YES").green().bold()
      } else if record.is_covered.is_empty() {
        style("N/A").dim()
      } else {
        style(record.is_covered.as_str()).red().bold()
      }
    ));
    self.field("Parent Serial:", &record.parent_sr_no);
    self.field("Warranty Type:", &record.warranty_type);
    self.field("Warranty:", &record.warranty_type_description);
    self.field("Warranty End:", &record.warranty_end_date);
    self.field("Contract:", &record.service_contract_number);
    self.field("Service Line:", &record.service_line_descr);
    self.field("Coverage End:", &record.covered_product_line_end_date);
    self.field("Customer:", &record.contract_site_customer_name);
    self.field("Address:", &record.contract_site_address1);
    self.field("Site:", &record.site_location());

    let base_pids: Vec<&str> = record
      .base_pid_list
      .iter()
      .map(|p| p.base_pid.as_str())
      .filter(|p| !p.is_empty())
      .collect();
    self.field("Base PIDs:", &base_pids.join(", "));

    if !record.orderable_pid_list.is_empty() {
      self.push(format!("  {}", key("Orderable PIDs:")));
      for item in &record.orderable_pid_list {
        if item.item_description.is_empty() {
          self.push(format!("    {}", item.orderable_pid));
        } else {
          self.push(format!(
            "    {} {}",
            item.orderable_pid,
            style(format!("({})", item.item_description)).dim()
          ));
        }
      }
    }
  }

  fn coverage(&mut self, coverage: &CoverageSummary) {
    self.header("Coverage", "🛡");
    if coverage.serial_numbers.is_empty() {
      self.push(format!("  {}", style("No coverage records returned").dim()));
      return;
    }
    self.pagination(&coverage.pagination_response_record);
    for record in &coverage.serial_numbers {
      self.coverage_record(record);
    }
  }

  fn product(&mut self, product: &Product) {
    self.push(String::new());
    self.field("Name:", &product.product_name);
    self.field("Serial:", &product.sr_no);
    self.field("Base PID:", &product.base_pid);
    self.field("Orderable PID:", &product.orderable_pid);
    self.field("Type:", &product.product_type);
    self.field("Series:", &product.product_series);
    self.field("Category:", &product.product_category);
    self.field("Subcategory:", &product.product_subcategory);
    self.field("Released:", &product.release_date);
    self.field("Status:", &product.orderable_status);
    if let Some(dimensions) = product.dimensions.display() {
      self.field("Dimensions:", &dimensions);
    }
    self.field("Weight:", &product.weight);
    self.field("Form Factor:", &product.form_factor);
    self.field("Support:", &product.product_support_page);
  }

  fn products(&mut self, info: &ProductInfo) {
    self.header("Product", "📦");
    if info.product_list.is_empty() {
      self.push(format!("  {}", style("No product records returned").dim()));
      return;
    }
    self.pagination(&info.pagination_response_record);
    for product in &info.product_list {
      self.product(product);
    }
  }
}

fn render_human_readable(report: &Report) -> String {
  let mut lines = Lines::default();
  lines.push(format!(
    "{} {}",
    style("•").magenta(),
    Style::new()
      .bold()
      .magenta()
      .apply_to(format!("Lookup Results for: {}", &report.serial))
  ));
  lines.coverage(&report.coverage);
  lines.products(&report.product);
  lines.0.join("\n")
}

pub fn print_human_readable(report: &Report) {
  println!("{}", render_human_readable(report));
}

pub fn print_json(report: &Report) -> Result<()> {
  serde_json::to_string_pretty(report)
    .map(|s| println!("{s}"))
    .context("Failed to serialize report to JSON")
}

pub fn print_config(view: &SettingsView<'_>) -> Result<()> {
  serde_json::to_string_pretty(view)
    .map(|s| println!("{s}"))
    .context("Failed to serialize configuration")
}
