//! Payment-link command line tool.
//!
//! # Usage
//!
//! ```bash
//! # Native transfer link
//! paylink encode --to alice.eth --amount 1.5
//!
//! # Token transfer by symbol (needs token_search_url in config)
//! paylink encode --to 0x742e... --token usdc --amount 100 --chain 8453
//!
//! # Parse and validate
//! paylink decode "ethereum:0x742e...?value=1"
//! paylink validate "ethereum:0x742e...?value=1"
//!
//! # QR output
//! paylink encode --to alice.eth --amount 1.5 --qr
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` — Path to TOML configuration file (default: `paylink.toml`)
//! - `RUST_LOG` — Log level filter (default: `warn`)

#![allow(clippy::print_stdout)]

mod config;
mod link;
mod qr;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use alloy_primitives::U256;
use alloy_provider::{Provider, ProviderBuilder};
use paylink::address::{checksum_or_echo, is_hex_address};
use paylink::units::{parse_amount, parse_ether};
use paylink::{PaymentIntent, decode, encode, validate};
use paylink_http::{ChainFeedClient, ChainRegistry, TokenSearchClient};
use paylink_resolve::resolver::{InputResolver, ResolveInput, ResolvedInput};
use paylink_resolve::service::KNOWN_SERVICES;
use paylink_resolve::NameResolver;

use crate::config::PaylinkConfig;

#[derive(Debug, Parser)]
#[command(name = "paylink", version, about = "Build, parse, and validate EIP-681 payment links")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a payment link from a recipient, amount, and token
    Encode(EncodeArgs),
    /// Parse a payment link and print the intent as JSON
    Decode {
        /// The `ethereum:` URL to parse
        url: String,
    },
    /// Check whether a string is a well-formed payment link
    Validate {
        /// The URL to check
        url: String,
    },
    /// Render any string as a terminal QR code
    Qr {
        /// Payload to render
        text: String,
    },
}

#[derive(Debug, Args)]
struct EncodeArgs {
    /// Recipient: hex address, ENS name, or Basename
    #[arg(long)]
    to: String,

    /// Amount in ether or whole tokens (e.g. "1.5")
    #[arg(long)]
    amount: Option<String>,

    /// Token to transfer: contract address or a symbol to search for.
    /// Absent means a native-currency transfer.
    #[arg(long)]
    token: Option<String>,

    /// Token decimals; required when --token is a raw address and an
    /// amount is given
    #[arg(long)]
    token_decimals: Option<u8>,

    /// EIP-155 chain id
    #[arg(long, default_value_t = 1)]
    chain: u64,

    /// Also render the link as a QR code
    #[arg(long)]
    qr: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Encode(args) => run_encode(args).await,
        Command::Decode { url } => run_decode(&url),
        Command::Validate { url } => run_validate(&url),
        Command::Qr { text } => {
            println!("{}", qr::render(&text)?);
            Ok(())
        }
    }
}

async fn run_encode(args: EncodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = PaylinkConfig::load()?;
    let mut registry = ChainRegistry::from_known();

    // Best-effort registry refresh; the built-in table covers the
    // common chains when the feed is unreachable.
    if let Some(feed_url) = &config.chain_feed_url {
        let client = ChainFeedClient::new(feed_url.parse()?);
        if let Err(e) = client.refresh(&mut registry).await {
            tracing::warn!(error = %e, "chain feed refresh failed, using built-in table");
        }
    }

    let resolver = build_resolver(&config, &registry);
    let resolved = resolver.resolve_address_input(&args.to, args.chain).await;
    if !resolved.is_valid {
        return Err(format!("could not resolve recipient '{}'", args.to).into());
    }
    let recipient = resolved
        .address
        .clone()
        .ok_or("recipient resolved without an address")?;

    let (intent, symbol) = build_intent(&args, &config, &registry, &recipient).await?;
    let url = encode(&intent);

    println!("{}", link_title(&args, &resolved, &symbol));
    println!("{url}");
    if args.qr {
        println!("{}", qr::render(&url)?);
    }
    Ok(())
}

async fn build_intent(
    args: &EncodeArgs,
    config: &PaylinkConfig,
    registry: &ChainRegistry,
    recipient: &str,
) -> Result<(PaymentIntent, String), Box<dyn std::error::Error>> {
    match &args.token {
        None => {
            let wei = args
                .amount
                .as_deref()
                .map(parse_ether)
                .transpose()?
                .filter(|v| *v > U256::ZERO);
            let symbol = registry
                .get(args.chain)
                .map_or_else(|| "ETH".to_owned(), |c| c.native_symbol.clone());
            Ok((link::native_transfer(recipient, wei, args.chain), symbol))
        }
        Some(token) if is_hex_address(token) => {
            let base_units = match args.amount.as_deref() {
                Some(amount) => {
                    let decimals = args.token_decimals.ok_or(
                        "--token-decimals is required when --token is a raw address",
                    )?;
                    Some(parse_amount(amount, decimals)?)
                }
                None => None,
            };
            let intent =
                link::token_transfer(&checksum_or_echo(token), recipient, base_units, args.chain);
            Ok((intent, "tokens".to_owned()))
        }
        Some(symbol) => {
            let base_url = config
                .token_search_url
                .as_deref()
                .ok_or("searching tokens by symbol requires token_search_url in the config")?;
            let client = TokenSearchClient::try_new(base_url.parse()?)?;
            let records = client.search(symbol, args.chain).await?;
            let record = records
                .first()
                .ok_or_else(|| format!("no token matching '{symbol}' on chain {}", args.chain))?;
            let base_units = args
                .amount
                .as_deref()
                .map(|a| parse_amount(a, record.decimals))
                .transpose()?;
            let intent = link::token_transfer(
                &record.address.to_checksum(None),
                recipient,
                base_units,
                args.chain,
            );
            Ok((intent, record.symbol.clone()))
        }
    }
}

fn link_title(args: &EncodeArgs, resolved: &ResolvedInput, symbol: &str) -> String {
    link::title(&resolved.display_name, args.amount.as_deref(), symbol)
}

/// Registers a name resolver for every known service we have an RPC
/// endpoint for. A service without an endpoint simply stays
/// unregistered; hex input keeps working offline.
fn build_resolver(config: &PaylinkConfig, registry: &ChainRegistry) -> InputResolver {
    let mut resolver = InputResolver::new();
    for service in KNOWN_SERVICES {
        let Some(rpc) = config.rpc_for(service.chain_id, registry) else {
            continue;
        };
        match rpc.parse::<Url>() {
            Ok(url) => {
                let provider = ProviderBuilder::new().connect_http(url).erased();
                resolver = resolver.with_resolver(NameResolver::new(provider, *service));
            }
            Err(e) => {
                tracing::warn!(service = service.name, error = %e, "bad RPC URL, skipping");
            }
        }
    }
    resolver
}

fn run_decode(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    match decode(url) {
        Some(intent) => {
            println!("{}", serde_json::to_string_pretty(&intent)?);
            Ok(())
        }
        None => Err("not an EIP-681 payment link".into()),
    }
}

fn run_validate(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if validate(url) {
        println!("valid");
        Ok(())
    } else {
        println!("invalid");
        std::process::exit(1);
    }
}
