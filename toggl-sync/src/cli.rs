use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "toggl-sync")]
#[command(about = "Sync time entries, projects and the running timer from Toggl")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Restore the saved session and show the last section
    Run,
    /// Log in with username and password, then sync
    Login,
    /// Run against local in-memory data (log in as dev / dev)
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["toggl-sync", "config-path"]).unwrap();
        assert!(matches!(cli.command, Commands::ConfigPath));

        let cli = Cli::try_parse_from(["toggl-sync", "login"]).unwrap();
        assert!(matches!(cli.command, Commands::Login));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["toggl-sync"]).is_err());
    }
}
