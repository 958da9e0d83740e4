use burnit::cli::{run_cli, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    burnit::logging::init_logging(&cli.log_level)?;
    run_cli(cli)
}
