//! `lscope container:debug:listeners`: Display services registered as event listeners.

use std::io::Write;

use clap::Args;
use lscope_common::config::KernelConfig;
use lscope_container::load_kernel_container;
use lscope_report::{discover_listeners, render_detail, render_summary};

use crate::output::write_lines;

/// Arguments for the `container:debug:listeners` command.
#[derive(Args, Debug)]
#[command(after_help = "Without a name, lists every public service defined as a listener.")]
pub struct ListenersArgs {
    /// A service id; shows the detail of that service instead of the index.
    pub name: Option<String>,

    /// Show public *and* private listeners.
    #[arg(long)]
    pub show_private: bool,
}

/// Executes the `container:debug:listeners` command.
///
/// Loads the kernel's container dump, then prints either the listener
/// index or the detail of the named service to `out`.
///
/// # Errors
///
/// Returns an error if the kernel is not in debug mode, the dump cannot be
/// found or read, or the named service does not exist.
pub fn execute<W: Write>(
    args: &ListenersArgs,
    kernel: &KernelConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    let graph = load_kernel_container(kernel)?;

    let lines = if let Some(ref name) = args.name {
        tracing::info!(service = %name, "rendering listener detail");
        render_detail(&graph, name)?
    } else {
        let listeners = discover_listeners(&graph);
        tracing::info!(
            listeners = listeners.len(),
            show_private = args.show_private,
            "rendering listener index"
        );
        render_summary(&graph, &listeners, args.show_private)?
    };

    write_lines(out, &lines)?;
    Ok(())
}
