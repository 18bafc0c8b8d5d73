use crate::config::{load_router_config, RouteConfig};
use crate::handler::{Body, EchoHandler, Handler};
use crate::router::Router;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface for nestrouter
///
/// Every command loads a route table file, builds the routing tree with
/// echo handlers, and exercises one routing operation against it.
#[derive(Parser)]
#[command(name = "nestrouter")]
#[command(about = "Inspect and exercise nested route tables", long_about = None)]
pub struct Cli {
    /// Log level: trace/debug/info/warn/error
    #[arg(long, global = true, env = "NESTR_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format: json/pretty
    #[arg(long, global = true, env = "NESTR_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a path and print the matched route and its parameters
    Resolve {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Absolute request path, e.g. /v1/users/7
        path: String,

        /// Print the match as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build a path from a route name qualified with the root namespace
    Reverse {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Colon-delimited route name, e.g. root:v1:users
        name: String,

        /// Path parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// List every route reachable by name
    Routes {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Dispatch a request through the tree and print the echoed response
    Dispatch {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Absolute request path, e.g. /v1/users/7
        path: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid key=value pair: '{s}'"))
}

/// Build the routing tree described by `path` with echo handlers on every leaf
///
/// # Errors
///
/// Fails if the file cannot be loaded or describes an invalid tree.
pub fn load_echo_router(path: &Path) -> Result<Router> {
    let config = load_router_config(path)?;
    let router = config
        .build(|route: &RouteConfig| Arc::new(EchoHandler::new(&route.name)) as Arc<dyn Handler>)
        .with_context(|| format!("Invalid route table in {}", path.display()))?;
    router.log_routes();
    Ok(router)
}

/// Run a parsed command, writing results to `out`
///
/// # Errors
///
/// Fails when the route table cannot be loaded, or when the requested
/// path or name does not lead to a route.
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Resolve { config, path, json } => {
            let router = load_echo_router(config)?;
            let matched = router
                .resolve(path)
                .ok_or_else(|| anyhow!("no route matches '{}'", path))?;

            if *json {
                let body = serde_json::json!({
                    "route": matched.route.name(),
                    "pattern": matched.route.pattern().template(),
                    "params": matched.path_params.to_map(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(out, "{}", matched.route.name())?;
                for (key, value) in matched.path_params.iter() {
                    writeln!(out, "  {key} = {value}")?;
                }
            }
            Ok(())
        }
        Commands::Reverse {
            config,
            name,
            params,
        } => {
            let router = load_echo_router(config)?;
            let params: HashMap<String, String> = params.iter().cloned().collect();
            let path = if router.namespace().is_empty() {
                router.reverse(name, &params)
            } else {
                router.url_for(name, &params)
            };
            match path {
                Some(path) => {
                    writeln!(out, "{path}")?;
                    Ok(())
                }
                None => bail!("cannot build a path for '{}' with the given parameters", name),
            }
        }
        Commands::Routes { config } => {
            let router = load_echo_router(config)?;
            let namespace = router.namespace().to_string();
            for info in router.routes() {
                let name = if namespace.is_empty() {
                    info.name
                } else {
                    format!("{namespace}:{}", info.name)
                };
                writeln!(out, "{name}\t{}", info.path)?;
            }
            if let Some(default_route) = router.default_route() {
                writeln!(
                    out,
                    "(default) {}\t{}",
                    default_route.name(),
                    router.prefix()
                )?;
            }
            Ok(())
        }
        Commands::Dispatch { config, path } => {
            let router = load_echo_router(config)?;
            let request = http::Request::builder()
                .uri(path.as_str())
                .body(Body::new())
                .with_context(|| format!("Invalid request path '{}'", path))?;
            let response = router.handle(request);
            writeln!(out, "{}", response.status())?;
            if !response.body().is_empty() {
                writeln!(out, "{}", String::from_utf8_lossy(response.body()))?;
            }
            Ok(())
        }
    }
}
