//! Run pipeline: fetch inputs, compute allocations, render the report.
//!
//! Every selected distribution is prechecked before the first network call,
//! and every report is computed before anything is written, so a failure in
//! any distribution leaves stdout untouched.

use std::io::Write;

use serde::Serialize;
use splitcalc_allocation::{
    complement_pair, supply_fraction, AllocationEngine, AllocationError, AllocationReport,
};
use splitcalc_client::{BalanceSource, SupplySource};
use splitcalc_types::{Balance, Bps};

use crate::config::{BalanceParse, CalcConfig, DistributionConfig, SupplyLeg};
use crate::error::RunError;

/// Observed supply of one leg of a supply split.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupplyObservation {
    pub chain_id: u64,
    pub token: String,
    pub total_supply: u64,
    /// Fraction of the combined supply, in `[0, 1]`.
    pub fraction: f64,
    pub share: Bps,
}

/// Result of one distribution.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistributionReport {
    pub name: String,
    pub source: String,
    pub supplies: Option<[SupplyObservation; 2]>,
    pub report: AllocationReport,
}

pub struct Calculator<'a> {
    config: &'a CalcConfig,
    engine: AllocationEngine,
}

impl<'a> Calculator<'a> {
    pub fn new(config: &'a CalcConfig) -> Self {
        Self {
            config,
            engine: AllocationEngine::new(config.arithmetic),
        }
    }

    /// Compute a distribution from already-known inputs. No network access.
    ///
    /// `supplies` is `(first, second)` total supply and is required when the
    /// distribution has a supply split.
    pub fn compute(
        &self,
        dist: &DistributionConfig,
        balance: Balance,
        supplies: Option<(u64, u64)>,
    ) -> Result<DistributionReport, RunError> {
        let alloc_err = |source: AllocationError| RunError::Allocation {
            name: dist.name.clone(),
            source,
        };
        dist.precheck().map_err(alloc_err)?;

        let (pair, observations) = match (&dist.supply_split, supplies) {
            (None, _) => (None, None),
            (Some(_), None) => return Err(RunError::MissingSupply(dist.name.clone())),
            (Some(split), Some((x, y))) => {
                let (first, second) =
                    complement_pair(split.budget_bps, x, y, split.rounding).map_err(alloc_err)?;
                let fx = supply_fraction(x, y).map_err(alloc_err)?;
                let fy = supply_fraction(y, x).map_err(alloc_err)?;
                tracing::info!(
                    distribution = %dist.name,
                    first_fraction = fx,
                    second_fraction = fy,
                    first_bps = first.get(),
                    second_bps = second.get(),
                    "supply split computed"
                );
                (
                    Some((first, second)),
                    Some([
                        observe(&split.first, x, fx, first),
                        observe(&split.second, y, fy, second),
                    ]),
                )
            }
        };

        let table = dist.share_table(pair);
        let allocations = self.engine.allocate(balance, &table).map_err(alloc_err)?;
        let report = AllocationReport::new(balance, allocations);
        if !report.remainder().is_zero() {
            tracing::info!(
                distribution = %dist.name,
                remainder = report.remainder().base_units(),
                "rounding remainder stays in source account"
            );
        }

        Ok(DistributionReport {
            name: dist.name.clone(),
            source: dist.source.to_string(),
            supplies: observations,
            report,
        })
    }

    /// Fetch supplies and balance for `dist`, then compute it.
    pub async fn fetch_and_compute<B: BalanceSource, S: SupplySource>(
        &self,
        dist: &DistributionConfig,
        ledger: &B,
        supply: &S,
    ) -> Result<DistributionReport, RunError> {
        tracing::info!(distribution = %dist.name, "calculating distribution");

        let supplies = match &dist.supply_split {
            Some(split) => {
                let x = self.fetch_supply(dist, &split.first, supply).await?;
                let y = self.fetch_supply(dist, &split.second, supply).await?;
                Some((x, y))
            }
            None => None,
        };

        let account = dist.source.as_str();
        tracing::info!(distribution = %dist.name, account, "getting account balance");
        let raw = ledger
            .account_balance(account)
            .await
            .map_err(|source| RunError::Client {
                name: dist.name.clone(),
                target: account.to_string(),
                source,
            })?;
        let balance = self.parse_balance(dist, &raw)?;

        self.compute(dist, balance, supplies)
    }

    /// Precheck every distribution, then fetch and compute them in order.
    pub async fn run_all<B: BalanceSource, S: SupplySource>(
        &self,
        dists: &[&DistributionConfig],
        ledger: &B,
        supply: &S,
    ) -> Result<Vec<DistributionReport>, RunError> {
        for dist in dists {
            dist.precheck().map_err(|source| RunError::Allocation {
                name: dist.name.clone(),
                source,
            })?;
        }

        let mut reports = Vec::with_capacity(dists.len());
        for dist in dists {
            reports.push(self.fetch_and_compute(dist, ledger, supply).await?);
        }
        Ok(reports)
    }

    async fn fetch_supply<S: SupplySource>(
        &self,
        dist: &DistributionConfig,
        leg: &SupplyLeg,
        supply: &S,
    ) -> Result<u64, RunError> {
        let token = supply
            .token_supply(leg.chain_id, &leg.token)
            .await
            .map_err(|source| RunError::Client {
                name: dist.name.clone(),
                target: format!("token {} on chain {}", leg.token, leg.chain_id),
                source,
            })?;
        tracing::info!(
            chain_id = leg.chain_id,
            symbol = %token.symbol,
            total_supply = token.total_supply,
            "token supply"
        );
        Ok(token.total_supply)
    }

    /// Parse a balance string under the configured [`BalanceParse`] policy.
    pub fn parse_balance(&self, dist: &DistributionConfig, raw: &str) -> Result<Balance, RunError> {
        match self.config.balance_parse {
            BalanceParse::Strict => Balance::parse(raw).map_err(|source| RunError::Balance {
                name: dist.name.clone(),
                account: dist.source.to_string(),
                source,
            }),
            BalanceParse::Lenient => {
                let balance = Balance::parse_lenient(raw);
                if balance.is_zero() && Balance::parse(raw).is_err() {
                    tracing::warn!(
                        account = %dist.source,
                        raw,
                        "malformed balance treated as zero"
                    );
                }
                Ok(balance)
            }
        }
    }
}

fn observe(leg: &SupplyLeg, total_supply: u64, fraction: f64, share: Bps) -> SupplyObservation {
    SupplyObservation {
        chain_id: leg.chain_id,
        token: leg.token.clone(),
        total_supply,
        fraction,
        share,
    }
}

/// Write the human-readable report and `sendTokens` line of every distribution.
pub fn render<W: Write>(
    reports: &[DistributionReport],
    symbol: &str,
    out: &mut W,
) -> Result<(), RunError> {
    for dist in reports {
        writeln!(out, "Calculating {}...", dist.name)?;
        if let Some(supplies) = &dist.supplies {
            for s in supplies {
                writeln!(
                    out,
                    "Token supply on chain {} ({}): {}",
                    s.chain_id, s.token, s.total_supply
                )?;
            }
            for s in supplies {
                writeln!(
                    out,
                    "Supply share on chain {}: {} ({})",
                    s.chain_id, s.fraction, s.share
                )?;
            }
        }
        writeln!(out, "Account: {}", dist.source)?;
        writeln!(out, "{}", dist.report.balance_line(symbol))?;
        for line in dist.report.allocation_lines(symbol) {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "Generating CLI params...")?;
        let payload = dist.report.send_tokens_line().map_err(|source| RunError::Allocation {
            name: dist.name.clone(),
            source,
        })?;
        writeln!(out, "{payload}")?;
    }
    Ok(())
}
