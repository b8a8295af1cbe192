mod api;
mod cli;
mod commands;
mod config;
mod error;
mod output;
mod units;
mod validate;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{
    handle_cluster_command,
    handle_configure_command,
    handle_disk_command,
    handle_image_command,
    handle_karbon_command,
    handle_profile_command,
    handle_subnet_command,
    handle_vm_command,
};
use output::print_error;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(verbose: bool) {
    // RUST_LOG wins; --verbose only raises the fallback level.
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let connection = &cli.connection;
    let result = match &cli.command {
        Commands::Configure => handle_configure_command(),
        Commands::Profile(cmd) => handle_profile_command(cmd, connection),
        Commands::Vm(cmd) => handle_vm_command(cmd, connection),
        Commands::Image(cmd) => handle_image_command(cmd, connection),
        Commands::Cluster(cmd) => handle_cluster_command(cmd, connection),
        Commands::Subnet(cmd) => handle_subnet_command(cmd, connection),
        Commands::Disk(cmd) => handle_disk_command(cmd, connection),
        Commands::Karbon(cmd) => handle_karbon_command(cmd, connection),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
