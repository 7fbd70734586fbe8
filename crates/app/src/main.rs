use anyhow::Result;
use artifact_demo::cli::CliArgs;
use clap::Parser;

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    artifact_demo::runtime::run(cli_args)
}
