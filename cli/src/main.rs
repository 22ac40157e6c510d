//! paystream: token streams, linear vesting and payroll on Sui from the command line.

mod confirm;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use paystream_utils::{init_logging, LogFormat};
use paystream_wallet_core::{
    ActionError, ClientConfig, ClientSettings, DistributionList, KeystoreWallet, PaystreamClient,
    StreamPreview, StreamRequest, SuiRpcClient, VestingPreview, VestingRequest, WalletSigner,
};
use std::path::PathBuf;
use std::str::FromStr;

use crate::confirm::ConfirmingWallet;
use crate::output::{Fields, Output};

type Client = PaystreamClient<SuiRpcClient, ConfirmingWallet>;

#[derive(Parser, Debug)]
#[command(name = "paystream", version, about = "Token streams, vesting and payroll on Sui")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, global = true, env = "PAYSTREAM_CONFIG")]
    config: Option<PathBuf>,

    /// Network: "mainnet", "testnet", "devnet" or "localnet".
    #[arg(long, global = true, env = "PAYSTREAM_NETWORK")]
    network: Option<String>,

    /// Fullnode JSON-RPC URL (defaults to the network's public fullnode).
    #[arg(long, global = true, env = "PAYSTREAM_RPC_URL")]
    rpc_url: Option<String>,

    /// Sui CLI keystore file.
    #[arg(long, global = true, env = "PAYSTREAM_KEYSTORE")]
    keystore: Option<PathBuf>,

    /// Account to sign with (defaults to the first key in the keystore).
    #[arg(long, global = true, env = "PAYSTREAM_ADDRESS")]
    address: Option<String>,

    /// Gas budget per transaction, in MIST.
    #[arg(long, global = true, env = "PAYSTREAM_GAS_BUDGET")]
    gas_budget: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "PAYSTREAM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "PAYSTREAM_LOG_FORMAT")]
    log_format: Option<String>,

    /// Sign without asking for confirmation.
    #[arg(long, short = 'y', global = true, env = "PAYSTREAM_YES")]
    yes: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the active account and every address in the keystore.
    Address,
    /// Continuous token streams.
    Stream {
        #[command(subcommand)]
        action: StreamAction,
    },
    /// Linear vesting schedules.
    Vesting {
        #[command(subcommand)]
        action: VestingAction,
    },
    /// Payroll objects and salary payments.
    Payroll {
        #[command(subcommand)]
        action: PayrollAction,
    },
    /// Inspect the effective configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum StreamAction {
    /// Stream a SUI top-up to a recipient at a fixed rate.
    Create {
        #[arg(long)]
        recipient: String,
        /// SUI released per second.
        #[arg(long)]
        amount_per_second: String,
        /// SUI deposited into the stream.
        #[arg(long)]
        topup: String,
    },
    /// Withdraw what has streamed so far (recipient only).
    Withdraw { stream_id: String },
    /// Show how long a stream would run, without submitting anything.
    Preview {
        #[arg(long)]
        amount_per_second: String,
        #[arg(long)]
        topup: String,
    },
}

#[derive(Subcommand, Debug)]
enum VestingAction {
    /// Lock SUI for a beneficiary, unlocking linearly after a cliff.
    Create {
        #[arg(long)]
        beneficiary: String,
        /// SUI to lock.
        #[arg(long)]
        amount: String,
        /// Seconds before unlocking starts.
        #[arg(long, default_value = "0")]
        cliff: String,
        /// SUI released per period.
        #[arg(long)]
        release_rate: String,
        /// Unlocking period in seconds.
        #[arg(long)]
        period: String,
    },
    /// Claim the unlocked part of a vesting wallet.
    Claim { vesting_id: String },
    /// Show the schedule a vesting would have, without submitting anything.
    Preview {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "0")]
        cliff: String,
        #[arg(long)]
        release_rate: String,
        #[arg(long)]
        period: String,
    },
}

#[derive(Subcommand, Debug)]
enum PayrollAction {
    /// Create a payroll funded with the configured bootstrap deposit.
    Create,
    /// Register an employee and salary (in SUI) on a payroll.
    AddEmployee {
        payroll_id: String,
        employee: String,
        amount: String,
    },
    /// Pay one employee.
    Pay { payroll_id: String, employee: String },
    /// Pay every employee of a payroll.
    PayAll { payroll_id: String },
    /// Add and pay a list of employees, creating a payroll unless one is given.
    Distribute {
        /// Existing payroll to use.
        #[arg(long)]
        payroll_id: Option<String>,
        /// Employees as ADDRESS=AMOUNT.
        #[arg(required = true, value_parser = parse_entry)]
        entries: Vec<Entry>,
    },
    /// Sum the amounts of a distribution list.
    Total {
        #[arg(required = true, value_parser = parse_entry)]
        entries: Vec<Entry>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the configuration after file, env and flag overrides.
    Show,
}

/// One `ADDRESS=AMOUNT` distribution row.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    address: String,
    amount: String,
}

fn parse_entry(s: &str) -> Result<Entry, String> {
    let (address, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDRESS=AMOUNT, got {s:?}"))?;
    Ok(Entry {
        address: address.trim().to_string(),
        amount: amount.trim().to_string(),
    })
}

fn distribution_list(entries: Vec<Entry>) -> DistributionList {
    DistributionList::from_rows(entries.into_iter().map(|e| (e.address, e.amount)))
}

/// Build the effective configuration: file (or defaults), then flags and env.
fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = ClientConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ClientConfig::default(),
    };

    if let Some(network) = &cli.network {
        config.network = network.parse()?;
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = Some(url.clone());
    }
    if let Some(path) = &cli.keystore {
        config.keystore_path = path.clone();
    }
    if let Some(address) = &cli.address {
        config.active_address = Some(
            address
                .parse()
                .with_context(|| format!("invalid --address {address:?}"))?,
        );
    }
    if let Some(budget) = cli.gas_budget {
        config.gas_budget = budget;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    config.validate()?;
    Ok(config)
}

fn connect(config: &ClientConfig, assume_yes: bool) -> anyhow::Result<Client> {
    let keystore = KeystoreWallet::open(&config.keystore_path, config.active_address)
        .with_context(|| format!("failed to open keystore {}", config.keystore_path.display()))?;
    let chain = SuiRpcClient::new(config.rpc_url())?;
    let settings = ClientSettings::from_config(config)?;
    tracing::info!(
        network = %config.network,
        rpc = chain.rpc_url(),
        account = ?keystore.current_account(),
        "connected"
    );
    Ok(PaystreamClient::new(
        chain,
        ConfirmingWallet::new(keystore, assume_yes),
        settings,
    ))
}

/// Surface the user-facing message, keeping the full error in the debug log.
fn failed(error: ActionError) -> anyhow::Error {
    tracing::debug!(?error, "action failed");
    anyhow::anyhow!(error.user_message())
}

fn optional_id(id: Option<impl ToString>) -> Option<String> {
    id.map(|id| id.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(LogFormat::from_str(&config.log_format)?, &config.log_level);

    let out = Output::new(cli.json, config.network);

    match cli.command {
        Command::Address => {
            let keystore = KeystoreWallet::open(&config.keystore_path, config.active_address)
                .with_context(|| {
                    format!("failed to open keystore {}", config.keystore_path.display())
                })?;
            let addresses: Vec<String> = keystore.addresses().iter().map(|a| a.to_string()).collect();
            let active = optional_id(keystore.current_account());
            out.emit(
                active.as_deref().unwrap_or("No account in keystore"),
                Fields::new()
                    .with("active", active.clone())
                    .with("addresses", addresses),
            )?;
        }

        Command::Stream { action } => match action {
            StreamAction::Create {
                recipient,
                amount_per_second,
                topup,
            } => {
                let client = connect(&config, cli.yes)?;
                let created = client
                    .create_stream(&StreamRequest {
                        recipient_address: recipient,
                        amount_per_second,
                        topup_balance: topup,
                    })
                    .await
                    .map_err(failed)?;
                let plan = &created.plan;
                out.emit(
                    "Stream created successfully!",
                    Fields::new()
                        .with("stream_id", optional_id(created.stream_id))
                        .with("recipient", plan.recipient.to_string())
                        .with("start", plan.start.as_secs())
                        .with("end", plan.end.as_secs())
                        .with(
                            "duration",
                            paystream_utils::format_duration_compact(plan.duration_secs()),
                        )
                        .transaction(out.network(), &created.result),
                )?;
            }
            StreamAction::Withdraw { stream_id } => {
                let client = connect(&config, cli.yes)?;
                let result = client
                    .withdraw_from_stream(&stream_id)
                    .await
                    .map_err(failed)?;
                out.emit(
                    "Withdrawal successful!",
                    Fields::new()
                        .with("stream_id", stream_id)
                        .transaction(out.network(), &result),
                )?;
            }
            StreamAction::Preview {
                amount_per_second,
                topup,
            } => {
                let preview = StreamPreview::from_inputs(&amount_per_second, &topup)
                    .context("Invalid number values")?;
                out.emit(
                    "Stream preview",
                    Fields::new()
                        .with("duration", preview.formatted_duration)
                        .with("duration_secs", preview.duration_secs)
                        .with("rate_per_day", preview.rate_per_day.to_sui_string())
                        .with("balance", preview.balance.to_sui_string()),
                )?;
            }
        },

        Command::Vesting { action } => match action {
            VestingAction::Create {
                beneficiary,
                amount,
                cliff,
                release_rate,
                period,
            } => {
                let client = connect(&config, cli.yes)?;
                let created = client
                    .create_vesting(&VestingRequest {
                        beneficiary_address: beneficiary,
                        amount,
                        cliff_seconds: cliff,
                        release_rate,
                        period_seconds: period,
                    })
                    .await
                    .map_err(failed)?;
                let plan = &created.plan;
                out.emit(
                    "Vesting schedule created successfully!",
                    Fields::new()
                        .with("vesting_id", optional_id(created.vesting_id))
                        .with("beneficiary", plan.beneficiary.to_string())
                        .with("amount", plan.amount.to_sui_string())
                        .with("start", plan.start.as_secs())
                        .with(
                            "period",
                            paystream_utils::format_duration_long(plan.period_secs),
                        )
                        .transaction(out.network(), &created.result),
                )?;
            }
            VestingAction::Claim { vesting_id } => {
                let client = connect(&config, cli.yes)?;
                let result = client.claim_vesting(&vesting_id).await.map_err(failed)?;
                out.emit(
                    "Tokens claimed successfully!",
                    Fields::new()
                        .with("vesting_id", vesting_id)
                        .transaction(out.network(), &result),
                )?;
            }
            VestingAction::Preview {
                amount,
                cliff,
                release_rate,
                period,
            } => {
                let preview = VestingPreview::from_inputs(&amount, &cliff, &release_rate, &period)
                    .context("Invalid number values")?;
                out.emit(
                    "Vesting preview",
                    Fields::new()
                        .with("total_amount", preview.total_amount.to_sui_string())
                        .with("release_rate", preview.release_rate.to_sui_string())
                        .with("period", preview.formatted_period)
                        .with("period_secs", preview.period_secs)
                        .with("cliff", preview.formatted_cliff),
                )?;
            }
        },

        Command::Payroll { action } => match action {
            PayrollAction::Create => {
                let client = connect(&config, cli.yes)?;
                let created = client.create_payroll().await.map_err(failed)?;
                out.emit(
                    "Payroll created successfully!",
                    Fields::new()
                        .with("payroll_id", optional_id(created.payroll_id))
                        .with(
                            "funding",
                            client.settings().payroll_funding.to_sui_string(),
                        )
                        .transaction(out.network(), &created.result),
                )?;
            }
            PayrollAction::AddEmployee {
                payroll_id,
                employee,
                amount,
            } => {
                let client = connect(&config, cli.yes)?;
                let result = client
                    .add_employee(&payroll_id, &employee, &amount)
                    .await
                    .map_err(failed)?;
                out.emit(
                    "Employee added",
                    Fields::new()
                        .with("payroll_id", payroll_id)
                        .with("employee", employee)
                        .with("amount", amount)
                        .transaction(out.network(), &result),
                )?;
            }
            PayrollAction::Pay {
                payroll_id,
                employee,
            } => {
                let client = connect(&config, cli.yes)?;
                let result = client
                    .process_payment(&payroll_id, &employee)
                    .await
                    .map_err(failed)?;
                out.emit(
                    "Payment processed",
                    Fields::new()
                        .with("payroll_id", payroll_id)
                        .with("employee", employee)
                        .transaction(out.network(), &result),
                )?;
            }
            PayrollAction::PayAll { payroll_id } => {
                let client = connect(&config, cli.yes)?;
                let result = client
                    .process_all_payments(&payroll_id)
                    .await
                    .map_err(failed)?;
                out.emit(
                    "All payments processed",
                    Fields::new()
                        .with("payroll_id", payroll_id)
                        .transaction(out.network(), &result),
                )?;
            }
            PayrollAction::Distribute {
                payroll_id,
                entries,
            } => {
                let list = distribution_list(entries);
                tracing::info!(
                    employees = list.entries().len(),
                    total = %list.total_display(),
                    "distributing payroll"
                );
                let client = connect(&config, cli.yes)?;
                let report = client
                    .distribute(payroll_id.as_deref(), &list)
                    .await
                    .map_err(failed)?;
                out.payroll_run(&report)?;
                if !report.is_complete() {
                    anyhow::bail!("payroll run incomplete");
                }
            }
            PayrollAction::Total { entries } => {
                let list = distribution_list(entries);
                out.emit(
                    &format!("Total: {} SUI", list.total_display()),
                    Fields::new()
                        .with("employees", list.entries().len() as u64)
                        .with("total", list.total_display()),
                )?;
            }
        },

        Command::Config { action } => match action {
            ConfigAction::Show => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                } else {
                    print!("{}", config.to_toml_string()?);
                }
            }
        },
    }

    Ok(())
}
