//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{GameOutcome, InvestigationService};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::{BuiltinCase, CaseLoader, StdTerminal, TomlCaseLoader};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        None | Some(Commands::Play) => cmd_play(cli, &settings),
        Some(Commands::Map) => cmd_map(cli, &settings),
        Some(Commands::Suspects) => cmd_suspects(cli, &settings),
        Some(Commands::Config { command }) => cmd_config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Pick the case loader: `--case` wins over the configured case file.
pub fn case_loader(cli: &Cli, settings: &Settings) -> CliResult<Box<dyn CaseLoader>> {
    match cli.case.as_ref().or(settings.case_file.as_ref()) {
        Some(path) if path.is_dir() => Err(CliError::Usage(format!(
            "case file is a directory: {}",
            path.display()
        ))),
        Some(path) => Ok(Box::new(TomlCaseLoader::new(path))),
        None => Ok(Box::new(BuiltinCase)),
    }
}

#[instrument(level = "debug", skip_all)]
fn cmd_play(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let case = case_loader(cli, settings)?.load()?;
    let service = InvestigationService::new(settings.play_options());
    let mut term = StdTerminal::new();

    let GameOutcome { report, verdict } = service.play(&case, &mut term)?;
    debug!(visits = report.visits.len(), clues = report.ledger.len(), "game finished");

    println!();
    output::verdict(verdict.as_ref());
    output::info("End of the game. Thanks for playing.");
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_map(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let case = case_loader(cli, settings)?.load()?;
    output::header(&case.title);
    output::info(&case.map.to_display_tree());
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_suspects(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let case = case_loader(cli, settings)?.load()?;
    output::header("Known suspects:");
    output::suspects(case.suspects.distinct_suspects());
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory available"),
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "no config directory available".to_string(),
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            let template = Settings::default().to_toml()?;
            write_config(&path, &template)?;
            output::info(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

fn write_config(path: &std::path::Path, content: &str) -> Result<(), ApplicationError> {
    let io_err = |e: io::Error| ApplicationError::OperationFailed {
        context: format!("write config: {}", path.display()),
        source: Box::new(e),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_case_loader_defaults_to_builtin() {
        let cli = Cli::parse_from(["dquest", "map"]);
        let case = case_loader(&cli, &Settings::default())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(case.title, "The Mansion");
    }

    #[test]
    fn test_case_loader_rejects_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = Cli::parse_from(["dquest", "--case", dir.path().to_str().unwrap(), "map"]);
        let err = case_loader(&cli, &Settings::default()).err().unwrap();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_cli_case_overrides_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cottage.toml");
        std::fs::write(&path, "title = \"Cottage\"\n[map]\nname = \"Porch\"\n").unwrap();
        let settings = Settings {
            case_file: Some(dir.path().join("missing.toml")),
            ..Settings::default()
        };
        let cli = Cli::parse_from(["dquest", "--case", path.to_str().unwrap(), "map"]);
        let case = case_loader(&cli, &settings).unwrap().load().unwrap();
        assert_eq!(case.title, "Cottage");
    }
}
