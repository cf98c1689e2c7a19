//! JSON result reports.
//!
//! One report file per account per run, written once at completion. The
//! field names and layout are consumed by downstream accounting tooling,
//! so they are part of the contract and must not change.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sniper_core::{AccountContext, SaleResult};
use tracing::{info, warn};

use crate::error::ReportResult;

/// One report line for a completed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    #[serde(rename = "Account name")]
    pub account_name: String,
    #[serde(rename = "Price", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "Balance before selling", with = "rust_decimal::serde::float")]
    pub balance_before: Decimal,
    #[serde(rename = "Balance after selling", with = "rust_decimal::serde::float")]
    pub balance_after: Decimal,
    #[serde(rename = "Order id")]
    pub order_id: String,
    #[serde(rename = "Result")]
    pub result: String,
}

/// Top-level report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub requests_data: Vec<ReportEntry>,
}

/// Build the report document for one account.
///
/// Results whose account context is missing either balance are dropped
/// silently: a partial context means the sale never fully completed and
/// an entry with fabricated numbers would be worse than none.
pub fn build_report(ctx: &AccountContext, results: &[SaleResult]) -> Report {
    let mut requests_data = Vec::with_capacity(results.len());

    for result in results {
        let Some(sold) = ctx.tokens_sold() else {
            warn!(
                account = ctx.account_name(),
                order_id = %result.order_id,
                "Skipping result with incomplete balance data"
            );
            continue;
        };
        let before = ctx
            .balance_before_selling()
            .map(|b| b.inner())
            .unwrap_or_default();

        requests_data.push(ReportEntry {
            account_name: ctx.account_name().to_string(),
            price: result.price.inner(),
            balance_before: before,
            balance_after: result.balance.inner(),
            order_id: result.order_id.to_string(),
            result: format!("You sold {} tokens", sold),
        });
    }

    Report { requests_data }
}

/// Writes per-account report files into a fixed logs directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    logs_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }

    /// Write the report for one account, returning the file path.
    ///
    /// The filename embeds the account name and the local completion
    /// timestamp, so every run produces a fresh file.
    pub fn write(&self, ctx: &AccountContext, results: &[SaleResult]) -> ReportResult<PathBuf> {
        let report = build_report(ctx, results);
        let filename = format!(
            "{}-{}.json",
            ctx.account_name(),
            Local::now().format("%Y-%m-%d %H-%M-%S")
        );
        let path = self.logs_dir.join(filename);

        self.write_document(&path, &report)?;
        info!(
            account = ctx.account_name(),
            path = %path.display(),
            entries = report.requests_data.len(),
            "Report written"
        );
        Ok(path)
    }

    fn write_document(&self, path: &Path, report: &Report) -> ReportResult<()> {
        fs::create_dir_all(&self.logs_dir)?;
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json)?;
        Ok(())
    }
}
