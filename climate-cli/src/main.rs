//! Climate CLI - serve or query precipitation and temperature statistics.

use std::process::ExitCode;

use clap::Parser;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "climate-cli",
    version,
    about = "Climate statistics API over a station measurement dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    commands::run(cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::Command;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_with_port() {
        let cli = Cli::try_parse_from(["climate-cli", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { port, .. } => assert_eq!(port, 8080),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_range_with_optional_end() {
        let cli = Cli::try_parse_from(["climate-cli", "range", "2017-01-01"]).unwrap();
        match cli.command {
            Command::Range {
                start_date,
                end_date,
                ..
            } => {
                assert_eq!(start_date, "2017-01-01");
                assert!(end_date.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn csv_seed_requires_both_files() {
        let result = Cli::try_parse_from([
            "climate-cli",
            "serve",
            "--stations-csv",
            "stations.csv",
        ]);
        assert!(result.is_err());
    }
}
