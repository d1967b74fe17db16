//! CLI argument parsing

use crate::commands::{self, CheckArgs, MatchArgs, RoutesArgs};
use apiroute_core::{AppSettings, CurrentVersionSource, EnvSettings, CURRENT_API_VERSION_KEY};
use clap::{Parser, Subcommand};

/// apiroute - resolve and inspect versioned REST routes
#[derive(Parser, Debug)]
#[command(name = "apiroute")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Current API version; defaults to CURRENT_API_VERSION from the environment or .env
    #[arg(long, global = true, allow_hyphen_values = true)]
    current_version: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the versioned route table of a manifest
    Routes(RoutesArgs),

    /// Validate and register every route of a manifest
    Check(CheckArgs),

    /// Show which route answers a request
    Match(MatchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        let source = self.version_source();
        match self.command {
            Commands::Routes(args) => commands::routes(args, source.as_ref()),
            Commands::Check(args) => commands::check(args, source.as_ref()),
            Commands::Match(args) => commands::match_request(args, source.as_ref()),
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info,apiroute=debug,apiroute_core=debug"
        } else {
            "info"
        }
    }

    fn version_source(&self) -> Box<dyn CurrentVersionSource> {
        match &self.current_version {
            Some(value) => Box::new(AppSettings::new().with(CURRENT_API_VERSION_KEY, value.as_str())),
            None => Box::new(EnvSettings::new().with_dotenv()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        let cli = Cli::parse_from(["apiroute", "check", "routes.toml"]);
        assert_eq!(cli.log_filter(), "info");

        let cli = Cli::parse_from(["apiroute", "check", "routes.toml", "--verbose"]);
        assert!(cli.log_filter().contains("apiroute_core=debug"));
    }
}
