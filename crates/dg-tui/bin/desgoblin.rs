//! Desgoblin: a small terminal RPG
//!
//! Main entry point for the game.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use env_logger::{Builder, Env, Target};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use dg_core::combat::EscapePolicy;
use dg_core::{GameRng, MAX_SEED, Session, SessionConfig};
use dg_tui::{App, Theme};

/// Desgoblin: explore, fight goblins, topple the bosses
#[derive(Parser, Debug)]
#[command(name = "desgoblin")]
#[command(author, version, about = "Desgoblin - clear the land of goblins!", long_about = None)]
struct Args {
    /// World seed (random when omitted)
    #[arg(short = 's', long = "seed", value_parser = clap::value_parser!(u64).range(0..=MAX_SEED))]
    seed: Option<u64>,

    /// Session config file (JSON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Map width, walls included
    #[arg(long = "width")]
    width: Option<usize>,

    /// Map height, walls included
    #[arg(long = "height")]
    height: Option<usize>,

    /// What a failed escape costs (opponent-strikes, turn-passes)
    #[arg(long = "escape-policy")]
    escape_policy: Option<EscapePolicy>,

    /// Print the generated map and exit
    #[arg(long = "dump-map")]
    dump_map: bool,

    /// Color the dumped map with ANSI escapes
    #[arg(long = "ansi", requires = "dump_map")]
    ansi: bool,

    /// Write log output to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let default = if args.verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default));
    match &args.log_file {
        Some(path) => builder.target(Target::Pipe(Box::new(File::create(path)?))),
        None => builder.target(Target::Stderr),
    };
    // A logger may already be installed when embedded; not fatal
    let _ = builder.try_init();
    Ok(())
}

fn load_config(args: &Args) -> io::Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load_from_file(path).map_err(io::Error::other)?,
        None => SessionConfig::default(),
    };
    if let Some(width) = args.width {
        config.map.width = width;
    }
    if let Some(height) = args.height {
        config.map.height = height;
    }
    if let Some(policy) = args.escape_policy {
        config.escape_policy = policy;
    }
    config.map.validate().map_err(io::Error::other)?;
    Ok(config)
}

fn main() -> io::Result<()> {
    // Parse command-line arguments before terminal setup
    let args = Args::parse();
    init_logging(&args)?;

    let config = load_config(&args)?;
    let seed = args
        .seed
        .unwrap_or_else(|| GameRng::from_entropy().next_seed());
    log::info!("starting session with seed {seed}");
    let session = Session::new(config, seed).map_err(io::Error::other)?;

    if args.dump_map {
        println!("Using seed: {seed}");
        if args.ansi {
            println!("{}", session.map().render_ansi());
        } else {
            println!("{}", session.map().render_plain());
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, Theme::detect());
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
