//! Command-line client for Intel AMT out-of-band management.
//!
//! Wires together the config file, the WS-Management HTTP transport, and
//! the feature controllers from `amt-core`, then prints one human-readable
//! line per operation:
//!
//! ```text
//! amtctl -H lab1 -P secret power status
//! amtctl -H 10.0.0.5 -U admin -P secret serial enable
//! amtctl -H 10.0.0.5 -U admin -P secret kvm start
//! ```
//!
//! `--host` accepts either an address or an alias from the config file;
//! explicit flags always win over config values.

mod config;
mod wsman;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use amt_core::features::{identify, kvm, listener, power, redirection};
use amt_core::Session;
use config::{load_config, AmtConfig};
use wsman::{ConnectionOptions, WsmanClient};

#[derive(Parser, Debug)]
#[command(name = "amtctl", version, about = "Intel AMT out-of-band management client")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Increase log verbosity (repeatable).
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Controller address, or a host alias from the config file.
    #[arg(short = 'H', long, global = true)]
    host: Option<String>,

    /// Digest/basic auth user, typically "admin".
    #[arg(short = 'U', long, global = true)]
    username: Option<String>,

    /// Management password.
    #[arg(short = 'P', long, global = true)]
    password: Option<String>,

    /// WS-Management port (16992 plain, 16993 TLS).
    #[arg(short = 'p', long, global = true)]
    port: Option<u16>,

    /// Connect over https.
    #[arg(long, global = true)]
    tls: bool,

    /// Skip TLS certificate validation.
    #[arg(long, global = true)]
    insecure: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query or change the platform power state.
    Power {
        #[arg(value_enum)]
        action: PowerCliAction,
    },
    /// Serial-over-LAN redirection.
    Serial {
        #[arg(value_enum)]
        action: ToggleAction,
    },
    /// IDE redirection (remote drive mounting).
    Ider {
        #[arg(value_enum)]
        action: ToggleAction,
    },
    /// Redirection listener port.
    Listener {
        #[arg(value_enum)]
        action: ToggleAction,
    },
    /// KVM (remote screen) redirection.
    Kvm {
        #[arg(value_enum)]
        action: KvmAction,
    },
    /// Report firmware vendor and version.
    Identify,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PowerCliAction {
    Status,
    On,
    Off,
    Reset,
    SoftOff,
    SoftReset,
    Nmi,
    BusReset,
    GracefulBusReset,
    GracefulOff,
    GracefulReset,
    GracefulSoftOff,
    GracefulSoftReset,
    Hibernate,
    Sleep,
    DeepSleep,
}

impl PowerCliAction {
    /// The wire name understood by the power controller.
    fn wire_name(self) -> &'static str {
        match self {
            PowerCliAction::Status => "status",
            PowerCliAction::On => "on",
            PowerCliAction::Off => "off",
            PowerCliAction::Reset => "reset",
            PowerCliAction::SoftOff => "soft-off",
            PowerCliAction::SoftReset => "soft-reset",
            PowerCliAction::Nmi => "nmi",
            PowerCliAction::BusReset => "bus-reset",
            PowerCliAction::GracefulBusReset => "graceful-bus-reset",
            PowerCliAction::GracefulOff => "graceful-off",
            PowerCliAction::GracefulReset => "graceful-reset",
            PowerCliAction::GracefulSoftOff => "graceful-soft-off",
            PowerCliAction::GracefulSoftReset => "graceful-soft-reset",
            PowerCliAction::Hibernate => "hibernate",
            PowerCliAction::Sleep => "sleep",
            PowerCliAction::DeepSleep => "deep-sleep",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToggleAction {
    Status,
    Enable,
    Disable,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KvmAction {
    Status,
    Enable,
    Disable,
    Start,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug > 0 {
        EnvFilter::new(if cli.debug > 1 { "trace" } else { "debug" })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = load_config().context("failed to load config file")?;
    let options = resolve_connection(&cli.connection, &cfg)?;
    debug!(endpoint = %options.endpoint_url(), "connecting");

    let password = options.password.clone();
    let client = WsmanClient::new(options)?;
    let outcome = run_command(&client, &cli.command, &password).await?;
    println!("{outcome}");
    Ok(())
}

/// Merges CLI flags, the named host entry (when `--host` matches an
/// alias), and config defaults into one set of connection options.
fn resolve_connection(args: &ConnectionArgs, cfg: &AmtConfig) -> anyhow::Result<ConnectionOptions> {
    let host_arg = args
        .host
        .as_deref()
        .context("no host given; use --host <address|alias>")?;

    let entry = cfg.hosts.get(host_arg);
    let host = entry
        .map(|e| e.address.clone())
        .unwrap_or_else(|| host_arg.to_string());
    let username = args
        .username
        .clone()
        .or_else(|| entry.and_then(|e| e.username.clone()))
        .unwrap_or_else(|| "admin".to_string());
    let port = args
        .port
        .or_else(|| entry.and_then(|e| e.port))
        .unwrap_or(cfg.port);

    let Some(password) = args.password.clone() else {
        bail!("no password given; use --password");
    };

    Ok(ConnectionOptions {
        host,
        port,
        username,
        password,
        tls: args.tls || cfg.tls,
        accept_invalid_certs: args.insecure || cfg.accept_invalid_certs,
    })
}

/// Runs one subcommand and returns its single outcome line. Transition
/// refusals from the controller (for example an unsupported power state)
/// are reported through the outcome line, not as process errors.
async fn run_command(
    session: &dyn Session,
    command: &Command,
    password: &str,
) -> anyhow::Result<String> {
    let line = match command {
        Command::Power {
            action: PowerCliAction::Status,
        } => power::power_status(session).await?.to_string(),
        Command::Power { action } => power::request_power_state(session, action.wire_name())
            .await?
            .to_string(),
        Command::Serial { action } => match action {
            ToggleAction::Status => redirection::redirection_status(session).await?.to_string(),
            ToggleAction::Enable => redirection::set_redirection(session, Some(true), None)
                .await?
                .to_string(),
            ToggleAction::Disable => redirection::set_redirection(session, Some(false), None)
                .await?
                .to_string(),
        },
        Command::Ider { action } => match action {
            ToggleAction::Status => redirection::redirection_status(session).await?.to_string(),
            ToggleAction::Enable => redirection::set_redirection(session, None, Some(true))
                .await?
                .to_string(),
            ToggleAction::Disable => redirection::set_redirection(session, None, Some(false))
                .await?
                .to_string(),
        },
        Command::Listener { action } => match action {
            ToggleAction::Status => redirection::redirection_status(session).await?.to_string(),
            ToggleAction::Enable => listener::set_listener(session, true).await?.to_string(),
            ToggleAction::Disable => listener::set_listener(session, false).await?.to_string(),
        },
        Command::Kvm { action } => match action {
            KvmAction::Status => kvm::kvm_status(session).await?.to_string(),
            KvmAction::Enable => {
                kvm::kvm_enable(session, password).await?;
                "KVM Redirection enabled".to_string()
            }
            KvmAction::Disable => {
                kvm::kvm_disable(session).await?;
                "KVM redirection disabled".to_string()
            }
            KvmAction::Start => kvm::kvm_start(session).await?.to_string(),
        },
        Command::Identify => identify::identify(session).await?.to_string(),
    };
    Ok(line)
}
