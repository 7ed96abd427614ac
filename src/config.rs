use account_machine::workflow::Workflow;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Trait for reading configuration parameters
pub trait Config {
    fn script_path(&self) -> Option<&Path>;

    fn max_steps(&self) -> usize;
}

/// CLI configuration
#[derive(Parser, Debug)]
#[command(
    name = "bank-account",
    about = "A toy bank account: deposit, withdraw, check balance and list history",
    version
)]
pub struct CliConfig {
    /// CSV script of commands (`type,holder,amount`); reads commands from stdin when omitted
    #[arg(value_name = "SCRIPT_FILE")]
    script_file: Option<PathBuf>,

    /// Step budget for the `auto` workflow walk
    #[arg(long, value_name = "N", default_value_t = Workflow::DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

impl Config for CliConfig {
    fn script_path(&self) -> Option<&Path> {
        self.script_file.as_deref()
    }

    fn max_steps(&self) -> usize {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["bank-account"]).unwrap();

        assert_eq!(config.script_path(), None);
        assert_eq!(config.max_steps(), Workflow::DEFAULT_MAX_STEPS);
    }

    #[test]
    fn test_script_and_budget() {
        let config =
            CliConfig::try_parse_from(["bank-account", "ops.csv", "--max-steps", "5"]).unwrap();

        assert_eq!(config.script_path(), Some(Path::new("ops.csv")));
        assert_eq!(config.max_steps(), 5);
    }
}
