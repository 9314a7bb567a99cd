use crate::config::DispatchConfig;
use crate::runtime_config::RuntimeOverrides;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Command-line interface for seoroute
///
/// Inspects how a configured application maps virtual paths to controllers.
#[derive(Parser, Debug)]
#[command(name = "seoroute", version)]
#[command(about = "Resolve SEO-style paths to controllers", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the route a path resolves to, as JSON
    Resolve {
        /// Dispatch configuration (YAML, TOML or JSON); defaults apply when omitted
        #[arg(short, long, env = "SEOROUTE_CONFIG")]
        config: Option<PathBuf>,

        /// Virtual path, e.g. `admin/user_manager/list/2`
        path: String,
    },
    /// Print the controller type and resource a path maps to
    Locate {
        /// Dispatch configuration (YAML, TOML or JSON); defaults apply when omitted
        #[arg(short, long, env = "SEOROUTE_CONFIG")]
        config: Option<PathBuf>,

        /// Virtual path, e.g. `admin/user_manager/list/2`
        path: String,
    },
}

/// Output of `seoroute locate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Expected controller type
    pub type_name: String,
    /// Method identifier
    pub method: String,
    /// Computed resource path
    pub resource: PathBuf,
    /// Whether the resource exists on disk
    pub exists: bool,
}

/// Load the configuration (or defaults) and apply environment overrides.
///
/// # Errors
///
/// Propagates configuration read, parse and validation failures.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DispatchConfig> {
    let mut config = match path {
        Some(path) => DispatchConfig::load(path)?,
        None => DispatchConfig::default(),
    };
    RuntimeOverrides::from_env().apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Compute where the controller for `path` lives.
///
/// # Errors
///
/// Fails when the configuration cannot build a resolver.
pub fn locate(config: &DispatchConfig, path: &str) -> anyhow::Result<Location> {
    let resolver = crate::router::RouteResolver::from_config(config, config.registry())?;
    let route = resolver.resolve(path);
    let layout = config.layout();
    let resource = layout.resource_path(&route);
    Ok(Location {
        type_name: layout.type_name(&route),
        method: route.method().to_string(),
        exists: resource.is_file(),
        resource,
    })
}

/// Run a parsed command, writing its JSON result to `out`.
///
/// # Errors
///
/// Configuration and output failures.
pub fn run_command(command: &Commands, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Commands::Resolve { config, path } => {
            let config = load_config(config.as_deref())?;
            let resolver = crate::router::RouteResolver::from_config(&config, config.registry())?;
            let route = resolver.resolve(path);
            writeln!(out, "{}", serde_json::to_string_pretty(&route)?)?;
        }
        Commands::Locate { config, path } => {
            let config = load_config(config.as_deref())?;
            let location = locate(&config, path)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&location)?)?;
        }
    }
    Ok(())
}

/// Parse the process arguments and run the selected command on stdout.
///
/// # Errors
///
/// See [`run_command`].
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(&cli.command, &mut out)
}
