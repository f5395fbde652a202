//! mdmark CLI: markdown bookmark notes for project source lines
//!
//! Commands: new, switch, add, list, show, status, path, completions

mod project;
mod terminal;

use std::io::{self, Write};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mdmark_core::config::global_config_path;
use mdmark_core::{Config, FileStore, Host, MdmarkError, SessionState, SourceLocation};
use mdmark_store::{default_session_path, JsonFileSession, LocalFileStore, NoteStore};

use crate::terminal::Terminal;

#[derive(Parser)]
#[command(name = "mdmark")]
#[command(version)]
#[command(about = "Markdown bookmark notes for project source lines")]
struct Cli {
    /// Project root (default: nearest ancestor holding .vscode/ or .git/)
    #[arg(long, global = true, env = "MDMARK_PROJECT")]
    project: Option<PathBuf>,

    /// Config file to read instead of the global one
    #[arg(long, global = true, env = "MDMARK_CONFIG")]
    config: Option<PathBuf>,

    /// File holding the active note between invocations
    #[arg(long, global = true, env = "MDMARK_SESSION")]
    session_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a bookmark note and make it active
    New {
        /// Note name (prompted if omitted)
        name: Option<String>,
    },
    /// Change the active bookmark note
    Switch {
        /// Note to activate (picked interactively if omitted)
        name: Option<String>,
    },
    /// Append a bookmark for a source line to the active note
    #[command(alias = "a")]
    Add {
        /// Source file to bookmark
        #[arg(long, requires = "line")]
        file: Option<PathBuf>,
        /// 1-based line in the source file
        #[arg(long, requires = "file")]
        line: Option<NonZeroU32>,
        /// Link text (prompted if omitted)
        #[arg(long)]
        text: Option<String>,
    },
    /// List bookmark notes, marking the active one
    #[command(alias = "ls")]
    List,
    /// Print a bookmark note
    Show {
        /// Note to print (default: the active note)
        name: Option<String>,
    },
    /// Show project, storage folder, and active note
    Status,
    /// Print the storage folder path
    Path,
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "mdmark", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let project_root = project::resolve(cli.project.as_deref(), &cwd);
    tracing::debug!(root = ?project_root, "project root");

    let global = cli.config.clone().or_else(global_config_path);
    let config = Config::load(global.as_deref(), project_root.as_deref())
        .context("Failed to load configuration")?;

    let session_path = cli
        .session_file
        .clone()
        .or_else(|| config.session_file.clone())
        .or_else(default_session_path)
        .context("No location for the session file; pass --session-file")?;
    let scope = project_root.clone().unwrap_or_else(|| cwd.clone());
    let session = JsonFileSession::open(&session_path, &scope)
        .with_context(|| format!("Failed to open session {}", session_path.display()))?;

    let location = match &cli.command {
        Commands::Add {
            file: Some(file),
            line: Some(line),
            ..
        } => Some(SourceLocation {
            path: std::path::absolute(file)
                .with_context(|| format!("Failed to resolve {}", file.display()))?,
            line: *line,
        }),
        _ => None,
    };

    let mut store = NoteStore::new(
        project_root,
        config,
        LocalFileStore,
        session,
        Terminal::stdio(location),
    );

    match execute(&mut store, cli.command) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            store.report(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn execute<F, S, H>(store: &mut NoteStore<F, S, H>, command: Commands) -> mdmark_core::Result<()>
where
    F: FileStore,
    S: SessionState,
    H: Host,
{
    match command {
        Commands::New { name } => {
            store.create_note(name.as_deref())?;
        }
        Commands::Switch { name } => {
            store.switch_note(name.as_deref())?;
        }
        Commands::Add { text, .. } => {
            store.append_bookmark(text.as_deref())?;
        }
        Commands::List => {
            let notes = store.list_notes()?;
            let active = store.active_note();
            let mut out = io::stdout().lock();
            for note in notes {
                let marker = if active.as_deref() == Some(note.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let _ = writeln!(out, "{marker} {note}");
            }
        }
        Commands::Show { name } => {
            let name = name
                .or_else(|| store.active_note())
                .ok_or(MdmarkError::NoActiveNote)?;
            print!("{}", store.read_note(&name)?);
        }
        Commands::Status => {
            let Some(project) = store.project_root() else {
                return Err(MdmarkError::NoWorkspace);
            };
            println!("project: {}", project.display());
            println!("storage: {}", store.storage_path()?.display());
            println!("active:  {}", store.active_note().as_deref().unwrap_or("(none)"));
        }
        Commands::Path => {
            println!("{}", store.storage_path()?.display());
        }
        Commands::Completions { .. } => {}
    }
    Ok(())
}
