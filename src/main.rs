use anyhow::Result;
use clap::Parser;

use h2h::{args::Cli, convert_tree, H2hError};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let config = cli.to_config();

    match convert_tree(&cli.src, &cli.dst, &config) {
        Ok(summary) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary.to_json())?);
            } else {
                println!("Processed {} files", summary.converted);
            }
            Ok(())
        }
        Err(H2hError::Conversion { summary }) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary.to_json())?);
            } else {
                println!("Processed {} files", summary.converted);
            }
            for failure in &summary.failures {
                eprintln!("Error: {}", failure);
            }
            Err(H2hError::Conversion { summary }.into())
        }
        Err(e) => Err(e.into()),
    }
}
