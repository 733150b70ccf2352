//! Command dispatch: load settings, build the workspace, feed it commands.

use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{
    parse_line, parse_script, ApplicationError, Command, IoResultExt, Outcome, Workspace,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::DomainResult;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run { script, fail_fast }) => _run(cli, script, *fail_fast),
        Some(Commands::Exec {
            commands,
            fail_fast,
        }) => _exec(cli, commands, *fail_fast),
        Some(Commands::Repl) => _repl(cli),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| CliError::io("current directory", e)),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = config_dir(cli)?;
    Ok(Settings::load(Some(&dir))?)
}

fn workspace(cli: &Cli) -> CliResult<Workspace> {
    Ok(Workspace::new(load_settings(cli)?)?)
}

#[instrument(skip(cli))]
fn _run(cli: &Cli, script: &Path, fail_fast: bool) -> CliResult<()> {
    let text = std::fs::read_to_string(script).with_path_context("read script", script)?;
    let mut workspace = workspace(cli)?;
    run_commands(&mut workspace, parse_script(&text), fail_fast)
}

#[instrument(skip(cli))]
fn _exec(cli: &Cli, commands: &[String], fail_fast: bool) -> CliResult<()> {
    let mut workspace = workspace(cli)?;
    let parsed = commands
        .iter()
        .enumerate()
        .filter_map(|(i, line)| match parse_line(line) {
            Ok(None) => None,
            Ok(Some(command)) => Some((i + 1, Ok(command))),
            Err(e) => Some((i + 1, Err(e))),
        })
        .collect();
    run_commands(&mut workspace, parsed, fail_fast)
}

fn _repl(cli: &Cli) -> CliResult<()> {
    let mut workspace = workspace(cli)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        output::header("dsviz: <structure> <operation> [args], e.g. 'stack push 4'; ctrl-d to quit");
        output::prompt(">");
    }
    for (i, line) in stdin.lock().lines().enumerate() {
        let line = line.map_err(|e| CliError::io("read stdin", e))?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => report(&mut workspace, i + 1, &command),
            Err(e) => output::error(&ApplicationError::Script {
                line: i + 1,
                source: e,
            }),
        }
        if interactive {
            output::prompt(">");
        }
    }
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence):");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: (no config directory on this platform)"),
            }
            let local = local_config_path(&config_dir(cli)?);
            output::detail(&format!("local:  {}", local.display()));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

/// Execute parsed commands in order, printing each outcome.
///
/// A rejected command is reported and skipped; with `fail_fast` it ends the
/// run with its error instead.
pub fn run_commands(
    workspace: &mut Workspace,
    commands: Vec<(usize, DomainResult<Command>)>,
    fail_fast: bool,
) -> CliResult<()> {
    let mut failures = 0usize;
    for (line, parsed) in commands {
        let result = parsed
            .map_err(ApplicationError::from)
            .and_then(|command| workspace.execute(&command));
        match result {
            Ok(outcome) => print_outcome(workspace, &outcome),
            Err(e) => {
                let e = match e {
                    ApplicationError::Domain(source) => ApplicationError::Script { line, source },
                    other => other,
                };
                output::error(&e);
                failures += 1;
                if fail_fast {
                    return Err(e.into());
                }
            }
        }
    }
    debug!(failures, "run finished");
    if failures > 0 {
        output::warning(&format!("{} command(s) rejected", failures));
    }
    Ok(())
}

fn report(workspace: &mut Workspace, line: usize, command: &Command) {
    match workspace.execute(command) {
        Ok(outcome) => print_outcome(workspace, &outcome),
        Err(ApplicationError::Domain(source)) => {
            output::error(&ApplicationError::Script { line, source })
        }
        Err(e) => output::error(&e),
    }
}

fn print_outcome(workspace: &Workspace, outcome: &Outcome) {
    match outcome {
        Outcome::Changed(structure) => {
            let (cursor, len) = workspace.history_position(*structure);
            let label = format!("{} [{}/{}]", structure, cursor + 1, len);
            output::action(&label, &workspace.render(*structure));
        }
        Outcome::Report(text) => output::info(text),
    }
}
