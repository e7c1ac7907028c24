//! Linkhub CLI.
//!
//! Every command writes one JSON envelope to stdout: `{"ok": ...}` on
//! success (exit code 0) or `{"err": {"code", "name", "message"}}` on
//! failure (exit code 1). Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use linkhub::authority::TokenRequest;
use linkhub::json::{self, JsonObject, JsonValue, Number};
use linkhub::mapper::{stringify, to_json_value};
use linkhub::signing::{self, CanonicalRequest, Signer};
use linkhub::{Authority, AuthorityConfig, LinkhubError, LinkhubResult};

#[derive(Parser)]
#[command(name = "linkhub")]
#[command(about = "Linkhub authority client", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.linkhub/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a session token
    Token {
        /// Service the token is for
        #[arg(long)]
        service_id: String,
        /// Account the token is for
        #[arg(long)]
        access_id: String,
        /// Requested scopes
        #[arg(long = "scope")]
        scope: Vec<String>,
        /// Original client address when proxying
        #[arg(long)]
        forwarded_ip: Option<String>,
    },

    /// Show the remaining points of an account
    Balance {
        /// Service to query
        #[arg(long)]
        service_id: String,
        /// Session token
        #[arg(long)]
        token: String,
    },

    /// Show the remaining points of the partner
    PartnerBalance {
        /// Service to query
        #[arg(long)]
        service_id: String,
        /// Session token
        #[arg(long)]
        token: String,
    },

    /// Print a signed token request without sending it
    Sign {
        /// Service the token is for
        #[arg(long)]
        service_id: String,
        /// Account the token is for
        #[arg(long)]
        access_id: String,
        /// Requested scopes
        #[arg(long = "scope")]
        scope: Vec<String>,
        /// Request timestamp, YYYY-MM-DDTHH:MM:SSZ (default: now)
        #[arg(long)]
        timestamp: Option<String>,
        /// Original client address when proxying
        #[arg(long)]
        forwarded_ip: Option<String>,
    },

    /// Parse JSON from stdin and print it in compact form
    Format,

    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("linkhub=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkhub=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> LinkhubResult<AuthorityConfig> {
    let mut config = match path {
        Some(p) => AuthorityConfig::load(p)?,
        None => AuthorityConfig::load(&AuthorityConfig::default_config_path())?,
    };
    config.apply_overrides(|name| std::env::var(name).ok());
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("linkhub v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            return ExitCode::SUCCESS;
        }
    };

    match run(command, cli.config.as_ref()) {
        Ok(value) => {
            let mut envelope = JsonObject::new();
            envelope.insert("ok", value);
            println!("{}", JsonValue::Object(envelope));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let mut detail = JsonObject::new();
            detail.insert("code", e.code());
            detail.insert("name", e.name());
            detail.insert("message", e.message());
            let mut envelope = JsonObject::new();
            envelope.insert("err", detail);
            println!("{}", JsonValue::Object(envelope));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config_path: Option<&PathBuf>) -> LinkhubResult<JsonValue> {
    match command {
        Commands::Format => json::parse(&read_input(std::io::stdin().lock())?),
        Commands::Sign {
            service_id,
            access_id,
            scope,
            timestamp,
            forwarded_ip,
        } => {
            let config = load_config(config_path)?;
            let signer = Signer::new(&config.link_id, &config.secret_key)?;
            let timestamp = match timestamp {
                Some(ts) => {
                    signing::parse_timestamp(&ts)?;
                    ts
                }
                None => signing::timestamp_now(),
            };
            let body = stringify(&TokenRequest { access_id, scope })?;
            let forwarded_ip = forwarded_ip.or(config.forwarded_ip);
            let request = CanonicalRequest::token(&service_id, body.as_bytes(), timestamp)
                .with_forwarded_ip(forwarded_ip.as_deref());

            let headers: JsonObject = signer
                .headers(&request)
                .into_iter()
                .map(|(name, value)| (name, JsonValue::from(value)))
                .collect();
            let mut out = JsonObject::new();
            out.insert("body", body);
            out.insert("canonical", request.canonical_string());
            out.insert("headers", headers);
            Ok(JsonValue::Object(out))
        }
        Commands::Token {
            service_id,
            access_id,
            scope,
            forwarded_ip,
        } => {
            let config = load_config(config_path)?;
            let authority = Authority::from_config(&config)?;
            let forwarded_ip = forwarded_ip.or(config.forwarded_ip);
            let token = authority.get_token_forwarded(
                &service_id,
                &access_id,
                &scope,
                forwarded_ip.as_deref(),
            )?;
            to_json_value(&token)
        }
        Commands::Balance { service_id, token } => {
            let authority = Authority::from_config(&load_config(config_path)?)?;
            points(authority.get_balance(&token, &service_id)?)
        }
        Commands::PartnerBalance { service_id, token } => {
            let authority = Authority::from_config(&load_config(config_path)?)?;
            points(authority.get_partner_balance(&token, &service_id)?)
        }
        Commands::Version => Ok(JsonValue::from(env!("CARGO_PKG_VERSION"))),
    }
}

/// Read the whole document to format.
fn read_input<R: Read>(mut reader: R) -> LinkhubResult<Vec<u8>> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|e| LinkhubError::Configuration(format!("cannot read JSON input: {}", e)))?;
    Ok(input)
}

fn points(value: f64) -> LinkhubResult<JsonValue> {
    Number::from_f64(value)
        .map(JsonValue::Number)
        .ok_or_else(|| LinkhubError::TypeMismatch {
            expected: "finite number",
            found: value.to_string(),
        })
}
