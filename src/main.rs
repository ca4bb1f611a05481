//! ISCN registrar command line.
//!
//! Pre-flight tooling for ISCN registrations: format a payload into the
//! record the chain will store, estimate the transaction gas, and quote the
//! registration fee against the chain's fee-per-byte parameter.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use iscn_registrar::config::{load_config, RegistrarConfig};
use iscn_registrar::fees::{FeeQuoteOptions, FeeQuoter, GasModel, HttpFeeOracle};
use iscn_registrar::iscn::{format_payload, ContentPayload, FormattedRecord, IscnMessage};
use iscn_registrar::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "iscn-registrar")]
#[command(about = "Format, size and quote ISCN record registrations", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ISCN record a payload formats to
    Format {
        /// Payload JSON file, or `-` for stdin
        payload: PathBuf,
        #[arg(long, default_value_t = 1)]
        version: u64,
    },
    /// Estimate gas and fee for the create/update message
    EstimateGas {
        payload: PathBuf,
        /// Signer address placed in the message
        #[arg(long)]
        from: String,
        /// Existing record to update; omitted for a new record
        #[arg(long)]
        iscn_id: Option<String>,
    },
    /// Quote the registration fee using the chain's fee per byte
    EstimateFee {
        payload: PathBuf,
        #[arg(long, default_value_t = 1)]
        version: u64,
        /// CID of the previous record version
        #[arg(long)]
        parent: Option<String>,
    },
    /// Load and validate the configuration
    CheckConfig,
}

/// Record with its blobs decoded for display.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordView {
    record_notes: String,
    content_fingerprints: Vec<String>,
    stakeholders: Vec<Value>,
    content_metadata: Value,
}

impl RecordView {
    fn new(record: &FormattedRecord) -> Result<Self, serde_json::Error> {
        Ok(Self {
            record_notes: record.record_notes.clone(),
            content_fingerprints: record.content_fingerprints.clone(),
            stakeholders: record
                .stakeholders
                .iter()
                .map(|s| serde_json::from_slice(s))
                .collect::<Result<_, _>>()?,
            content_metadata: serde_json::from_slice(&record.content_metadata)?,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RegistrarConfig::default(),
    };

    logging::init_logging(&config.observability);
    metrics::set_enabled(config.observability.metrics_enabled);

    match cli.command {
        Commands::Format { payload, version } => {
            let payload = read_payload(&payload)?;
            let record = format_payload(&payload, version)?;
            print_json(&RecordView::new(&record)?)?;
        }
        Commands::EstimateGas {
            payload,
            from,
            iscn_id,
        } => {
            let payload = read_payload(&payload)?;
            let record = format_payload(&payload, 1)?;
            let message = IscnMessage::new(from, iscn_id, record);
            let model = GasModel::from_config(&config.gas, &config.chain.denom);
            print_json(&model.estimate(&message)?)?;
        }
        Commands::EstimateFee {
            payload,
            version,
            parent,
        } => {
            let payload = read_payload(&payload)?;
            let oracle = HttpFeeOracle::new(&config.fee_oracle)?;
            tracing::info!(url = %oracle.params_url(), "Querying fee per byte");
            let quoter = FeeQuoter::new(Arc::new(oracle), config.chain.registry_name.clone());
            let options = FeeQuoteOptions {
                version,
                parent_link: parent,
            };
            let fee = quoter.estimate_fee(&payload, &options).await?;
            print_json(&serde_json::json!({
                "amount": fee.to_string(),
                "denom": config.chain.denom,
            }))?;
        }
        Commands::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn read_payload(path: &Path) -> Result<ContentPayload, Box<dyn std::error::Error>> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
