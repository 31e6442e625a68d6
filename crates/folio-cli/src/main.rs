use clap::Parser;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level.to_tracing())
        .with_writer(std::io::stderr)
        .init();
    commands::run_command(cli)
}
