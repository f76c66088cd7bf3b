//! CLI command definitions and dispatch.

pub mod listeners;

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use lscope_common::config::KernelConfig;
use lscope_common::constants::{DEFAULT_ENVIRONMENT, DEFAULT_KERNEL_NAME, LISTENERS_COMMAND};

/// lscope: inspect event listeners of a compiled container.
#[derive(Parser, Debug)]
#[command(name = "lscope", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Kernel whose container is inspected.
    #[command(flatten)]
    pub kernel: KernelArgs,
}

/// Options describing the application kernel.
#[derive(Args, Debug)]
pub struct KernelArgs {
    /// Kernel environment.
    #[arg(short, long = "env", global = true, env = "LSCOPE_ENV", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Kernel name, prefix of the container class.
    #[arg(long, global = true, env = "LSCOPE_KERNEL_NAME", default_value = DEFAULT_KERNEL_NAME)]
    pub kernel_name: String,

    /// Force debug mode on or off (on outside `prod` by default).
    #[arg(long, global = true, env = "LSCOPE_DEBUG", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub debug: Option<bool>,

    /// Switch off debug mode.
    #[arg(long, global = true, conflicts_with = "debug")]
    pub no_debug: bool,

    /// Cache directory of the environment (default: `var/cache/<env>`).
    #[arg(long, global = true, env = "LSCOPE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Container dump file (`.yaml`, `.yml` or `.json`), bypassing discovery in the cache directory.
    #[arg(long, global = true, env = "LSCOPE_CONTAINER_DUMP")]
    pub container_dump: Option<PathBuf>,
}

impl KernelArgs {
    /// Builds the kernel configuration these options describe.
    pub fn into_config(self) -> KernelConfig {
        let mut config = KernelConfig::for_environment(self.environment);
        config.name = self.kernel_name;
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        if self.no_debug {
            config.debug = false;
        }
        if let Some(cache_dir) = self.cache_dir {
            config.cache_dir = cache_dir;
        }
        config.container_dump = self.container_dump;
        config
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Displays current services defined as listeners for an application.
    #[command(name = LISTENERS_COMMAND)]
    Listeners(listeners::ListenersArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let kernel = cli.kernel.into_config();
    tracing::debug!(
        environment = %kernel.environment,
        debug = kernel.debug,
        cache_dir = %kernel.cache_dir.display(),
        "kernel configured"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Listeners(args) => listeners::execute(&args, &kernel, &mut out),
    }
}
