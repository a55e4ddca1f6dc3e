// brainstep: Brainfuck interpreter with a stepping tape debugger

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use brainstep::config::{EngineConfig, DEFAULT_MEMORY_SIZE};
use brainstep::io::{BinaryInput, CapturedOutput, InputSource, TextInput, WriterOutput};
use brainstep::program;
use brainstep::ui::App;
use brainstep::Engine;

#[derive(Parser, Debug)]
#[command(name = "brainstep", version, about = "Run or step through a Brainfuck program")]
struct Args {
    /// Program source file
    file: PathBuf,

    /// Number of tape cells
    #[arg(short, long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory: usize,

    /// Read program input from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Feed input one byte per read instead of one character
    #[arg(long)]
    binary: bool,

    /// Open the terminal debugger
    #[arg(short, long)]
    debug: bool,

    /// Only validate the brackets
    #[arg(long)]
    check: bool,

    /// Treat the breakpoint marker as an ordinary comment character
    #[arg(long)]
    no_breakpoints: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Log lines would scribble over the debugger, so it stays silent unless asked
    let default_filter = if args.debug { "off" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    if args.check {
        if let Err(e) = program::check(&source) {
            eprintln!("{}: {}", args.file.display(), e);
            std::process::exit(1);
        }
        println!("{}: ok", args.file.display());
        return Ok(());
    }

    let mut config = EngineConfig::new().with_memory_size(args.memory);
    if args.no_breakpoints {
        config = config.with_breakpoint_marker(None);
    }

    let input = open_input(&args)?;

    if args.debug {
        return run_debugger(config, input, &source);
    }

    let output = WriterOutput::new(io::stdout());
    let mut engine = match Engine::with_config(config, input, Some(Box::new(output)), &source) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    let result = engine.run();
    info!(%result, "run finished");
    // Dropping the engine flushes the last partial output line
    drop(engine);
    if let Some(e) = result.error() {
        eprintln!("\nRuntime error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Input source for the program, from `--input` or stdin
///
/// The debugger owns stdin for key presses, so without `--input` it gets no source
/// and `,` fails with `NoInputSource`.
fn open_input(args: &Args) -> io::Result<Option<Box<dyn InputSource>>> {
    let input: Box<dyn InputSource> = match (&args.input, args.binary) {
        (Some(path), false) => Box::new(TextInput::from_reader(fs::File::open(path)?)),
        (Some(path), true) => Box::new(BinaryInput::from_reader(fs::File::open(path)?)),
        (None, _) if args.debug => return Ok(None),
        (None, false) => Box::new(TextInput::from_reader(io::stdin())),
        (None, true) => Box::new(BinaryInput::from_reader(io::stdin())),
    };
    debug!(file = ?args.input, binary = args.binary, "input opened");
    Ok(Some(input))
}

fn run_debugger(
    config: EngineConfig,
    input: Option<Box<dyn InputSource>>,
    source: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = CapturedOutput::new();
    let engine = match Engine::with_config(
        config,
        input,
        Some(Box::new(output.clone())),
        source,
    ) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, output);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
