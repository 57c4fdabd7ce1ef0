//! splitcalc — entry point.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use splitcalc_cli::{render, CalcConfig, Calculator, ConfigOverrides};
use splitcalc_client::{LedgerClient, SupplyClient};
use splitcalc_utils::LogFormat;

#[derive(Parser)]
#[command(
    name = "splitcalc",
    about = "Compute basis-point reward splits and print sendTokens payloads"
)]
struct Cli {
    /// Path to a TOML configuration file. Without one the built-in
    /// distributions are used; CLI flags and env vars override file values.
    #[arg(long, env = "SPLITCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SPLITCALC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "SPLITCALC_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "SPLITCALC_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Ledger JSON-RPC endpoint.
    #[arg(long, env = "SPLITCALC_LEDGER_URL")]
    ledger_url: Option<String>,

    /// Token supply API endpoint.
    #[arg(long, env = "SPLITCALC_SUPPLY_URL")]
    supply_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Fetch balances and supplies, then print every selected distribution.
    Run {
        /// Distribution to run (repeatable). Defaults to all enabled ones.
        #[arg(long = "distribution", short = 'd')]
        distributions: Vec<String>,
    },
    /// Compute one distribution from a given balance without network access.
    Compute {
        /// Balance in base units, parsed under the configured `balance_parse`
        /// policy.
        #[arg(long)]
        balance: String,

        /// Distribution to compute. Defaults to the first enabled one.
        #[arg(long, short = 'd')]
        distribution: Option<String>,

        /// Total supply observed for the first supply-split leg.
        #[arg(long, requires = "supply_second")]
        supply_first: Option<u64>,

        /// Total supply observed for the second supply-split leg.
        #[arg(long, requires = "supply_first")]
        supply_second: Option<u64>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<CalcConfig> {
    let overrides = ConfigOverrides {
        log_level: cli.log_level.clone(),
        log_format: cli.log_format,
        timeout_secs: cli.timeout_secs,
        ledger_url: cli.ledger_url.clone(),
        supply_url: cli.supply_url.clone(),
    };
    CalcConfig::load(cli.config.as_deref(), &overrides).with_context(|| match &cli.config {
        Some(path) => format!("loading config from {}", path.display()),
        None => "validating built-in config".to_string(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    splitcalc_utils::init_logging(config.log_format, &config.log_level);

    let calc = Calculator::new(&config);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Run { distributions } => {
            let selected = config.select(&distributions)?;
            let ledger = LedgerClient::new(config.ledger.url.clone(), config.timeout())?;
            let supply = SupplyClient::new(config.supply.url.clone(), config.timeout())?;

            let reports = calc.run_all(&selected, &ledger, &supply).await?;
            render(&reports, &config.symbol, &mut stdout)?;
            tracing::info!(distributions = reports.len(), "run complete");
        }
        Command::Compute {
            balance,
            distribution,
            supply_first,
            supply_second,
        } => {
            let dist = match &distribution {
                Some(name) => config.distribution(name)?,
                None => config.select(&[])?[0],
            };
            let balance = calc.parse_balance(dist, &balance).context("parsing --balance")?;
            let supplies = supply_first.zip(supply_second);

            let report = calc.compute(dist, balance, supplies)?;
            render(&[report], &config.symbol, &mut stdout)?;
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
