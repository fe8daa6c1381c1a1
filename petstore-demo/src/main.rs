use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, warn};
use petstore_client::{
    ApiClient, ClientConfig, PetstoreApi,
    models::{ListPets, Pet},
};

mod printer;

use printer::{DemoOptions, Style};

const DEFAULT_BASE_URL: &str = "https://api.petstore.example.com/v1";
const DEFAULT_TOKEN: &str = "your-api-token";

#[derive(Parser, Debug)]
#[command(name = "petstore-demo")]
#[command(about = "Shows how to configure and use the Petstore API client", long_about = None)]
struct Args {
    /// Base URL of the Petstore API
    #[arg(long, env = "PETSTORE_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "PETSTORE_TOKEN")]
    token: Option<String>,

    /// Language of the usage snippets
    #[arg(long, value_enum, default_value_t = Style::Rust)]
    style: Style,

    /// Print the configuration as JSON
    #[arg(long)]
    json: bool,

    /// Call GET /pets on the configured API after printing the example
    #[arg(long)]
    list_pets: bool,

    /// Client configuration file; searched for from the working directory if omitted
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Name of the client generator mentioned in the instructions
    #[arg(long, default_value = "api-tool")]
    generator: String,
}

/// Flags override the configuration file, which overrides the defaults.
///
/// Without `--config`, the file is searched for from `cwd` upwards, but not
/// above `stop_dir` when one is given.
fn resolve_config(args: &Args, cwd: &Path, stop_dir: Option<&Path>) -> Result<ClientConfig> {
    let from_file = match &args.config {
        Some(path) => Some(
            ClientConfig::from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
        ),
        None => match ClientConfig::discover_within(cwd, stop_dir) {
            Ok(found) => found,
            Err(e) => {
                warn!("ignoring configuration file: {:#}", anyhow::Error::new(e));
                None
            }
        },
    };

    let mut config =
        from_file.unwrap_or_else(|| ClientConfig::new(DEFAULT_BASE_URL).with_token(DEFAULT_TOKEN));
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }
    debug!("using base URL {}", config.base_url);
    Ok(config)
}

fn fetch_pets(config: &ClientConfig) -> Result<Vec<Pet>> {
    let client = ApiClient::from_config(config).context("failed to set up the API client")?;
    let api = PetstoreApi::new(client);
    api.list_pets(&ListPets {
        limit: Some(10),
        ..Default::default()
    })
    .with_context(|| format!("GET {}/pets failed", trimmed_base_url(config)))
}

/// Fetches the first page of pets and writes one line per pet to `out`.
fn list_pets(config: &ClientConfig, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Listing {}/pets ...", trimmed_base_url(config))?;
    let pets = fetch_pets(config)?;
    writeln!(out, "Found {} pets", pets.len())?;
    for pet in &pets {
        writeln!(out, "  - #{} {} ({})", pet.id, pet.name, pet.status.as_str())?;
    }
    Ok(())
}

fn trimmed_base_url(config: &ClientConfig) -> &str {
    config.base_url.trim_end_matches('/')
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = resolve_config(&args, &cwd, None)?;

    let options = DemoOptions {
        style: args.style,
        json: args.json,
        generator: args.generator.clone(),
    };
    print!("{}", printer::render(&config, &options)?);

    if args.list_pets {
        let mut stdout = io::stdout().lock();
        writeln!(stdout)?;
        list_pets(&config, &mut stdout)?;
    }

    Ok(())
}
