mod cli;

use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use cli::{Cli, Commands};
use message_search::config::Config;
use message_search::input::KeyPress;
use message_search::log::{LogKey, RunLogs};
use message_search::ui::{self, CombatLogView};
use message_search::view::{InputHandler, LogDisplayUpdater, SearchExtension};

/// Target time between frames
const FRAME_TIME: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.init {
        return cli::init_config(&cli.config);
    }

    let config = cli::load_config(&cli)?;

    if let Some(log_file) = &config.log_file {
        if let Err(e) = message_search::logging::init(log_file) {
            eprintln!("Logging disabled: {}", e);
        }
    }

    if let Some(Commands::Runs) = &cli.command {
        for run in cli::list_runs(&config.saves_dir)? {
            println!("{}", run);
        }
        return Ok(());
    }

    let run = cli::resolve_run(&config)?;
    let logs = RunLogs::new(&config.saves_dir, &run);
    let key = cli::resolve_key(&logs, cli.level, cli.turn);
    info!(%run, root = %logs.root().display(), ?key, "opening run");

    if let Some(Commands::Print { filter, categories }) = &cli.command {
        let key = key.ok_or_else(|| anyhow::anyhow!("Run '{}' has no combat logs", run))?;
        return cli::print_log(&config, logs, key, filter, categories);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_view(&mut terminal, &config, logs, key);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_view(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: &Config,
    logs: RunLogs,
    key: Option<LogKey>,
) -> anyhow::Result<()> {
    let base = CombatLogView::new(logs, config.key_bindings()?);
    let mut view = SearchExtension::new(base, config.search_session()?);

    match key {
        Some(key) => view.set_log_display(key),
        None => warn!("run has no combat logs"),
    }

    loop {
        let frame_start = Instant::now();

        // Gather every key pressed since the last frame
        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    events.push(KeyPress::from(key));
                }
            }
        }

        if !events.is_empty() {
            view.process_input(&mut events);
        }
        if view.inner().should_close {
            break;
        }

        terminal.draw(|f| ui::draw(f, &mut view))?;
        view.inner_mut().tick();

        // Sleep out the rest of the frame, waking early for input
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            event::poll(FRAME_TIME - elapsed)?;
        }
    }

    info!("combat log view closed");
    Ok(())
}
