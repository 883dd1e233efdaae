use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "compare",
    version,
    about = "Compare unit prices of competing products"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "compare.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive comparison screen (default)
    Tui,

    /// Compare PRICE/AMOUNT pairs once and print the result
    ///
    /// Use `--` before pairs that start with a minus sign.
    Calc {
        /// Products as PRICE/AMOUNT, e.g. 100/4 150/5
        #[arg(required = true, num_args = 1..)]
        pairs: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Tui if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli {
            config: PathBuf::from("compare.toml"),
            command: None,
        };

        assert!(matches!(cli.get_command(), Commands::Tui));
    }

    #[test]
    fn test_cli_parsing_calc() {
        let args = vec!["compare", "calc", "--json", "100/4", "150/5"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Calc { pairs, json } => {
                assert!(json);
                assert_eq!(pairs, vec!["100/4", "150/5"]);
            }
            _ => panic!("Expected Calc command"),
        }
    }

    #[test]
    fn test_cli_parsing_calc_negative_after_separator() {
        let args = vec!["compare", "calc", "--", "-5/2", "5/2"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Calc { pairs, json } => {
                assert!(!json);
                assert_eq!(pairs, vec!["-5/2", "5/2"]);
            }
            _ => panic!("Expected Calc command"),
        }
    }

    #[test]
    fn test_cli_parsing_calc_requires_pairs() {
        assert!(Cli::try_parse_from(vec!["compare", "calc"]).is_err());
    }

    #[test]
    fn test_cli_parsing_config_validate_with_path() {
        let args = vec!["compare", "config", "validate", "--config", "other.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                action: ConfigCommands::Validate
            }
        ));
    }
}
