//! # Storefront Demo Library
//!
//! Command-line driver for the storefront stores. Each invocation opens an
//! [`AppContext`], runs one command against it and exits; the signed-in
//! session carries over between invocations through the snapshot file.
//!
//! ## Module Organization
//! ```text
//! storefront_demo/
//! ├── lib.rs        ◄─── You are here (arg parsing, logging, startup)
//! ├── commands.rs   ◄─── catalog, shop, login, logout, whoami
//! └── error.rs      ◄─── DemoError
//! ```

pub mod commands;
pub mod error;

use std::io;
use std::path::PathBuf;

use storefront_core::{Money, PriceRange, ProductQuery, SortOrder};
use storefront_state::{AppContext, MemoryStorage, StorefrontConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use error::{DemoError, DemoResult};

const USAGE: &str = "\
Storefront demo

Usage: storefront [--config <PATH>] <COMMAND>

Commands:
  catalog [--category <ID>]... [--sort <ORDER>] [--min <N>] [--max <N>]
                                  Browse products (home sections without filters)
  shop [PRODUCT_ID]...            Add products to a cart and show the drawer
                                  (scripted session over top deals without ids)
  login <EMAIL> <PASSWORD> [NAME] Sign in (sign up when NAME is given)
  logout                          Sign out
  whoami                          Show the current session

Options:
  -c, --config <PATH>  Config file (default: platform config dir)
  -h, --help           Show this help message

Sort orders: relevance, price-low, price-high, discount, rating";

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Catalog(Option<ProductQuery>),
    Shop(Vec<String>),
    Login {
        email: String,
        password: String,
        name: Option<String>,
    },
    Logout,
    Whoami,
    Help,
}

/// Command line after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

/// Runs the demo with `args` (program name excluded).
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Demo Startup                                      │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,storefront=debug; override with RUST_LOG            │
/// │                                                                         │
/// │  2. Load Config ──────────────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env                     │
/// │                                                                         │
/// │  3. Open AppContext ──────────────────────────────────────────────────► │
/// │     • restores the session snapshot from the data dir                   │
/// │     • no data dir: in-memory storage, session is not kept               │
/// │                                                                         │
/// │  4. Execute Command ──────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Vec<String>) -> DemoResult<()> {
    let invocation = parse_args(&args)?;
    if invocation.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();
    info!("Starting storefront demo");

    let config = match invocation.config_path {
        // an explicit file must load
        Some(path) => StorefrontConfig::load(Some(path))?,
        None => StorefrontConfig::load_or_default(None),
    };

    let mut ctx = match AppContext::open(config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = %e, "Snapshot storage unavailable; session will not be kept");
            AppContext::bootstrap(config, MemoryStorage::new())
        }
    };

    let mut out = io::stdout().lock();
    commands::execute(&mut ctx, invocation.command, &mut out).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_state=trace` - Trace the stores only
/// - Default: `info,storefront=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    // Logs go to stderr so command output stays clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Parses the command line.
pub fn parse_args(args: &[String]) -> DemoResult<Invocation> {
    let mut config_path = None;
    let mut rest: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| DemoError::usage("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => {
                return Ok(Invocation {
                    config_path,
                    command: Command::Help,
                })
            }
            other => rest.push(other),
        }
        i += 1;
    }

    let command = match rest.split_first() {
        None => Command::Help,
        Some((&"catalog", flags)) => Command::Catalog(parse_query(flags)?),
        Some((&"shop", ids)) => Command::Shop(ids.iter().map(|s| s.to_string()).collect()),
        Some((&"login", params)) => match params {
            [email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
                name: None,
            },
            [email, password, name @ ..] if !name.is_empty() => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
                name: Some(name.join(" ")),
            },
            _ => return Err(DemoError::usage("login needs <EMAIL> <PASSWORD> [NAME]")),
        },
        Some((&"logout", [])) => Command::Logout,
        Some((&"whoami", [])) => Command::Whoami,
        Some((other, _)) => {
            return Err(DemoError::usage(format!("unexpected arguments: {}", other)))
        }
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

/// Parses `catalog` flags. No flags means the home page sections.
fn parse_query(flags: &[&str]) -> DemoResult<Option<ProductQuery>> {
    if flags.is_empty() {
        return Ok(None);
    }

    let mut query = ProductQuery::default();
    let mut min = None;
    let mut max = None;

    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .copied()
                .ok_or_else(|| DemoError::usage(format!("{} needs a value", flag)))
        };
        match *flag {
            "--category" => query.toggle_category(value()?),
            "--sort" => query.sort = value()?.parse::<SortOrder>().map_err(DemoError::Usage)?,
            "--min" => min = Some(parse_amount(value()?)?),
            "--max" => max = Some(parse_amount(value()?)?),
            other => return Err(DemoError::usage(format!("unknown catalog flag: {}", other))),
        }
    }

    query.price_range = match (min, max) {
        (None, None) => None,
        (min, Some(max)) => Some(PriceRange::new(min.unwrap_or_else(Money::zero), max)?),
        (Some(min), None) => Some(PriceRange::at_least(min)),
    };

    Ok(Some(query))
}

/// Whole rupees from the command line.
fn parse_amount(raw: &str) -> DemoResult<Money> {
    raw.parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .map(Money::from_major)
        .ok_or_else(|| DemoError::usage(format!("not a price: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::CoreError;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args_is_help() {
        assert_eq!(parse_args(&[]).unwrap().command, Command::Help);
        assert_eq!(parse_args(&args(&["shop", "-h"])).unwrap().command, Command::Help);
    }

    #[test]
    fn test_parse_config_anywhere() {
        let inv = parse_args(&args(&["whoami", "--config", "/tmp/s.toml"])).unwrap();
        assert_eq!(inv.command, Command::Whoami);
        assert_eq!(inv.config_path, Some(PathBuf::from("/tmp/s.toml")));
        assert!(parse_args(&args(&["whoami", "-c"])).is_err());
    }

    #[test]
    fn test_parse_login_with_and_without_name() {
        let inv = parse_args(&args(&["login", "a@b.co", "secret1"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Login {
                email: "a@b.co".into(),
                password: "secret1".into(),
                name: None
            }
        );

        let inv = parse_args(&args(&["login", "a@b.co", "secret1", "Asha", "Rao"])).unwrap();
        assert!(matches!(inv.command, Command::Login { name: Some(n), .. } if n == "Asha Rao"));

        assert!(parse_args(&args(&["login", "a@b.co"])).is_err());
    }

    #[test]
    fn test_parse_catalog_query() {
        let inv = parse_args(&args(&[
            "catalog", "--category", "fashion", "--sort", "price-low", "--max", "5000",
        ]))
        .unwrap();
        let Command::Catalog(Some(query)) = inv.command else {
            panic!("expected a catalog query");
        };
        assert_eq!(query.categories, vec!["fashion".to_string()]);
        assert_eq!(query.sort, SortOrder::PriceLowToHigh);
        assert_eq!(
            query.price_range,
            Some(PriceRange::new(Money::zero(), Money::from_major(5000)).unwrap())
        );

        assert_eq!(
            parse_args(&args(&["catalog"])).unwrap().command,
            Command::Catalog(None)
        );
    }

    #[test]
    fn test_parse_catalog_rejects_bad_input() {
        assert!(matches!(
            parse_args(&args(&["catalog", "--min", "900", "--max", "100"])),
            Err(DemoError::Core(CoreError::InvalidPriceRange { .. }))
        ));
        assert!(matches!(
            parse_args(&args(&["catalog", "--sort", "newest"])),
            Err(DemoError::Usage(_))
        ));
        assert!(parse_args(&args(&["catalog", "--max", "-1"])).is_err());
        assert!(parse_args(&args(&["catalog", "--sort"])).is_err());
    }

    #[test]
    fn test_parse_shop_and_unknown() {
        assert_eq!(parse_args(&args(&["shop"])).unwrap().command, Command::Shop(vec![]));
        assert_eq!(
            parse_args(&args(&["shop", "1", "1"])).unwrap().command,
            Command::Shop(vec!["1".into(), "1".into()])
        );
        assert!(parse_args(&args(&["checkout"])).is_err());
        assert!(parse_args(&args(&["logout", "now"])).is_err());
    }
}
