use clap::{Args, Parser, Subcommand, builder::styling};
use eyre::Result;
use kibana_io::cli::{self, DEFAULT_INDEX, Mode, TransferOptions, TypeReport};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use url::Url;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Export/Import Kibana searches, visualizations, dashboards and index-patterns in JSON files
#[derive(Parser)]
#[command(name = "kibana-io", version, styles = STYLES)]
struct Cli {
    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump Kibana objects from the store into the directory
    Export(TransferArgs),

    /// Upload a dump directory into the store
    Import {
        #[command(flatten)]
        args: TransferArgs,

        /// Validate the store's TLS certificate (accepted blindly by default)
        #[arg(long)]
        verify_certs: bool,
    },
}

#[derive(Args)]
struct TransferArgs {
    /// Store URL, e.g. http://localhost:9200
    #[arg(long)]
    url: Url,

    /// Output/Input directory
    #[arg(long)]
    dir: PathBuf,

    /// Kibana index
    #[arg(long, default_value = DEFAULT_INDEX)]
    index: String,
}

impl TransferArgs {
    fn into_options(self) -> TransferOptions {
        TransferOptions::new(self.url, self.dir).with_index(self.index)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let (mode, options) = match cli.command {
        Commands::Export(args) => (Mode::Export, args.into_options()),
        Commands::Import { args, verify_certs } => (
            Mode::Import,
            args.into_options().with_accept_invalid_certs(!verify_certs),
        ),
    };

    log::info!(
        "{} {} with {}",
        match mode {
            Mode::Export => "Exporting to",
            Mode::Import => "Importing from",
        },
        options.dir.display().bright_black(),
        options.index.cyan(),
    );

    let report = cli::run_with(mode, &options, render).await;

    match report.fatal {
        Some(fatal) => Err(fatal),
        None => Ok(()),
    }
}

/// Log the warnings of a type, then its summary line
fn render(type_report: &TypeReport) {
    for failure in type_report.outcome.failures() {
        log::warn!("{} {}", "[WARN]".yellow(), failure);
    }

    if type_report.is_skipped() {
        log::warn!("{}", type_report.yellow());
    } else if type_report.is_complete() {
        log::info!("{}", type_report.green());
    } else {
        log::error!("{}", type_report.red());
    }
}
