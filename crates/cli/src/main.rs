use cardlink_pcsc::{CardSession, PcscService, PreferredProtocols, SessionConfig, ShareMode};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;

mod commands;
mod utils;

#[derive(Parser)]
#[command(version, about = "Talk to smart cards through the PC/SC resource manager")]
struct Cli {
    /// Reader to connect to (defaults to the first reader listed)
    #[arg(short, long, global = true)]
    reader: Option<String>,

    /// Trace level output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Connect in exclusive mode instead of shared
    #[arg(long, global = true)]
    exclusive: bool,

    /// Protocols to offer when connecting
    #[arg(long, value_enum, default_value_t = ProtocolArg::Any, global = true)]
    protocol: ProtocolArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    List,

    /// Connect and print the card's ATR
    Atr,

    /// Send one or more APDUs, in order
    Send {
        /// APDUs in hex, spaces allowed within quotes
        #[arg(required = true)]
        apdus: Vec<String>,
    },

    /// Interactive APDU shell
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProtocolArg {
    Any,
    T0,
    T1,
}

impl From<ProtocolArg> for PreferredProtocols {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Any => Self::Any,
            ProtocolArg::T0 => Self::T0,
            ProtocolArg::T1 => Self::T1,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let share_mode = if cli.exclusive {
        ShareMode::Exclusive
    } else {
        ShareMode::Shared
    };
    let config = SessionConfig::new()
        .with_share_mode(share_mode)
        .with_protocols(cli.protocol.into());

    let mut session = CardSession::try_new(PcscService::new(), config)?;

    match &cli.command {
        Commands::List => commands::list_readers(&mut session),
        Commands::Atr => commands::print_atr(&mut session, cli.reader.as_deref()),
        Commands::Send { apdus } => {
            commands::send_all(&mut session, cli.reader.as_deref(), apdus)
        }
        Commands::Shell => commands::shell(&mut session, cli.reader.as_deref()),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .init();
}
