//! Application wiring and account orchestration.

use std::sync::Arc;

use sniper_gateway::KucoinGateway;
use sniper_report::ReportWriter;
use sniper_seller::{Seller, SystemClock};
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::config::{AccountConfig, AppConfig};
use crate::error::AppResult;

/// Runs one seller per configured account to completion.
pub struct Application {
    config: AppConfig,
    report_writer: ReportWriter,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let report_writer = ReportWriter::new(config.report.logs_dir.clone());
        Self {
            config,
            report_writer,
        }
    }

    /// Run all accounts concurrently and wait for every one to finish.
    ///
    /// Accounts are independent: one account failing (for instance holding
    /// no tokens) must not stop the others from selling. The first error
    /// is returned only after every task has completed.
    pub async fn run(self) -> AppResult<()> {
        info!(
            coin = %self.config.seller.coin,
            symbol = %self.config.seller.symbol(),
            accounts = self.config.accounts.len(),
            list_time = self.config.seller.list_time,
            "Starting sell campaign"
        );

        let mut tasks: JoinSet<(String, AppResult<()>)> = JoinSet::new();

        for account in self.config.accounts.clone() {
            let name = account.name.clone();
            let config = self.config.clone();
            let report_writer = self.report_writer.clone();

            tasks.spawn(async move {
                let outcome = run_account(account, config, report_writer).await;
                (name, outcome)
            });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let (name, outcome) = joined?;
            match outcome {
                Ok(()) => info!(account = %name, "Account finished"),
                Err(e) => {
                    error!(account = %name, error = %e, "Account failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Sell one account's balance and write its report.
async fn run_account(
    account: AccountConfig,
    config: AppConfig,
    report_writer: ReportWriter,
) -> AppResult<()> {
    let gateway = KucoinGateway::new(
        &config.gateway.base_url,
        account.credentials(),
        account.proxy.as_deref(),
        config.gateway.timeout(),
    )?;

    let seller = Seller::new(
        account.name.clone(),
        Arc::new(gateway),
        SystemClock,
        config.seller.clone(),
    );

    let (ctx, result) = seller.run().await?;
    let path = report_writer.write(&ctx, &[result])?;
    info!(account = %account.name, report = %path.display(), "Sale completed");
    Ok(())
}
