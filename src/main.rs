use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{
    poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEvent, KeyEventKind,
};
use ratatui::Terminal;
use scribe::app::Editor;
use scribe::config::Config;
use scribe::services::terminal_modes::{self, TerminalModes};
use scribe::services::tracing_setup;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

/// A small terminal code editor
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(about = "A terminal code editor with syntax highlighting, undo/redo and search", long_about = None)]
#[command(version)]
struct Args {
    /// File to open. Supports line:col syntax (e.g., file.txt:10:5)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    dump_schema: bool,
}

/// Parsed file location from CLI argument in file:line:col format
#[derive(Debug, PartialEq)]
struct FileLocation {
    path: PathBuf,
    line: Option<usize>,
    column: Option<usize>,
}

/// Split an optional `:line[:col]` suffix off a path
fn parse_file_location(input: &str) -> FileLocation {
    let full_path = PathBuf::from(input);

    // A file literally named "foo:10" wins over the suffix syntax
    if full_path.is_file() {
        return FileLocation {
            path: full_path,
            line: None,
            column: None,
        };
    }

    let parts: Vec<&str> = input.rsplitn(3, ':').collect();

    match parts.as_slice() {
        [maybe_col, maybe_line, rest] if !rest.is_empty() => {
            if let (Ok(line), Ok(col)) = (maybe_line.parse::<usize>(), maybe_col.parse::<usize>()) {
                return FileLocation {
                    path: PathBuf::from(rest),
                    line: Some(line),
                    column: Some(col),
                };
            }
            // "dir:name:10" - only the last part is a line number
            if let Ok(line) = maybe_col.parse::<usize>() {
                return FileLocation {
                    path: PathBuf::from(format!("{rest}:{maybe_line}")),
                    line: Some(line),
                    column: None,
                };
            }
        }
        [maybe_line, rest] if !rest.is_empty() => {
            if let Ok(line) = maybe_line.parse::<usize>() {
                return FileLocation {
                    path: PathBuf::from(rest),
                    line: Some(line),
                    column: None,
                };
            }
        }
        _ => {}
    }

    FileLocation {
        path: full_path,
        line: None,
        column: None,
    }
}

/// The `--config` file, or the default location, falling back to defaults
fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(path) => match Config::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                eprintln!("Warning: {}: {}, using defaults", path.display(), e);
                Config::default()
            }
        },
        None => Config::load_or_default(),
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.dump_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    if let Err(e) = tracing_setup::init_global(&log_file) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    tracing::info!("Editor starting");

    let config = load_config(args.config.as_ref());

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).context("failed to serialize config")?;
        println!("{json}");
        return Ok(());
    }

    let location = args.file.as_deref().map(parse_file_location);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let (width, height) = crossterm::terminal::size().context("failed to query terminal size")?;
    let mut editor = Editor::new(config, width, height);

    if let Some(location) = &location {
        editor.open_file(&location.path);
        if let Some(line) = location.line {
            editor.goto(line, location.column.unwrap_or(1));
        }
    }

    let mut modes = TerminalModes::enable().context("failed to set up terminal")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    terminal.clear()?;

    let result = run_event_loop(&mut editor, &mut terminal);

    modes.restore();
    tracing::info!("Editor exiting");
    result
}

/// Main event loop: draw, wait for input, dispatch
fn run_event_loop(
    editor: &mut Editor,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    const POLL_TIMEOUT: Duration = Duration::from_millis(250);
    let mut needs_render = true;

    loop {
        if editor.should_quit() {
            break;
        }

        if needs_render {
            terminal.draw(|frame| editor.render(frame))?;
            needs_render = false;
        }

        if !event_poll(POLL_TIMEOUT)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    handle_key_event(editor, key_event);
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(w, h) => {
                editor.resize(w, h);
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}

fn handle_key_event(editor: &mut Editor, key_event: KeyEvent) {
    tracing::trace!(
        "Key event received: code={:?}, modifiers={:?}",
        key_event.code,
        key_event.modifiers
    );
    editor.handle_key(key_event.code, key_event.modifiers);
}
