use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use refugee_dashboard::labels::Dictionaries;
use refugee_dashboard::pages::{self, Page, PageContext, PageRequest};
use refugee_dashboard::{config, data, server};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one page interaction and print the resulting document
    Render {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// overview, general or country
        page: String,
        /// Widget choice as key=value, e.g. --param year=2000
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Serve the dashboard API
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, found '{}'", raw))
}

fn page_request(page: Page, params: Vec<(String, String)>) -> anyhow::Result<PageRequest> {
    let params: HashMap<String, String> = params.into_iter().collect();
    let value = serde_json::to_value(params)?;
    let request = match page {
        Page::Overview => PageRequest::Overview(serde_json::from_value(value)?),
        Page::General => PageRequest::General(serde_json::from_value(value)?),
        Page::Country => PageRequest::Country(serde_json::from_value(value)?),
    };
    Ok(request)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { config, page, params } => {
            let app_config = config::AppConfig::load_from_file(&config)?;
            let page = Page::from_key(&page).ok_or_else(|| anyhow!("Unknown page: {}", page))?;
            let request = page_request(page, params)?;

            let datasets = data::load_data(&app_config.input)?;
            let labels = Dictionaries::new().context("Invalid label dictionaries")?;
            let ctx = PageContext {
                data: &datasets,
                labels: &labels,
                map: &app_config.map,
            };

            let document = pages::evaluate(ctx, &request)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(&config)?;
            let datasets = data::load_data(&app_config.input)?;
            server::start_server(app_config, datasets).await?;
        }
    }

    Ok(())
}
