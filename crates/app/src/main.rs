use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use hub_core::model::CategoryId;
use services::{ApiConfig, CardGateway, HttpCardGateway};
use tracing_subscriber::EnvFilter;
use ui::vm::CategoryOptionVm;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, thiserror::Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid --category value: {raw}")]
    InvalidCategory { raw: String },
    #[error("invalid --api value: {raw}")]
    InvalidApiUrl { raw: String },
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    gateway: Arc<dyn CardGateway>,
    categories: Vec<CategoryOptionVm>,
}

impl UiApp for DesktopApp {
    fn card_gateway(&self) -> Arc<dyn CardGateway> {
        Arc::clone(&self.gateway)
    }

    fn categories(&self) -> Vec<CategoryOptionVm> {
        self.categories.clone()
    }

    fn default_category(&self) -> Option<CategoryId> {
        self.categories.first().map(|opt| opt.id.clone())
    }
}

struct Args {
    api: ApiConfig,
    categories: Vec<CategoryOptionVm>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>] [--token <token>] [--category <id[=label]>]...");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", services::config::DEFAULT_BASE_URL);
    eprintln!("  --category default=Default");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  HUB_API_BASE_URL, HUB_API_TOKEN, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut api = ApiConfig::from_env();
        let mut categories = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api = api.with_base_url(value);
                }
                "--token" => {
                    let value = require_value(args, "--token")?;
                    api = api.with_token(Some(value).filter(|token| !token.trim().is_empty()));
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    categories.push(parse_category(&value)?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if categories.is_empty() {
            categories.push(CategoryOptionVm::new(CategoryId::new("default"), "Default"));
        }

        Ok(Some(Self { api, categories }))
    }
}

/// `id` or `id=label`; the label defaults to the id.
fn parse_category(raw: &str) -> Result<CategoryOptionVm, ArgsError> {
    let (id, label) = raw.split_once('=').unwrap_or((raw, raw));
    let id: CategoryId = id.parse().map_err(|_| ArgsError::InvalidCategory {
        raw: raw.to_string(),
    })?;
    let label = match label.trim() {
        "" => id.as_str().to_string(),
        label => label.to_string(),
    };
    Ok(CategoryOptionVm::new(id, label))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    let gateway = HttpCardGateway::new(parsed.api.clone())?;
    tracing::info!(
        base_url = %parsed.api.base_url,
        categories = parsed.categories.len(),
        authenticated = parsed.api.token.is_some(),
        "starting card dialog"
    );

    let app = DesktopApp {
        gateway: Arc::new(gateway),
        categories: parsed.categories,
    };
    let context = build_app_context(Arc::new(app));

    // Some desktop setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Card Hub")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        tracing::error!(error = %err, "app exited with an error");
        std::process::exit(2);
    }
}
