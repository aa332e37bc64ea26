use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use shiproute_cli::commands::route::{handle_route, RouteCommandArgs};
use shiproute_cli::logging::{init_logging, LoggingConfig};
use shiproute_cli::output::OutputFormat;
use shiproute_cli::terminal::ColorPalette;
use shiproute_lib::ClientConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan fuel-constrained ship routes")]
struct Cli {
    /// Routing service endpoint.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Report format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request a route between two ports and print what the map shows.
    Route(RouteCommandArgs),
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();
    let config = cli.client_config();

    match &cli.command {
        Command::Route(args) => {
            let report = handle_route(args, &config).await?;
            let rendered = report
                .render(cli.format, &ColorPalette::detect())
                .context("failed to format the report")?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
