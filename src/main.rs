use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent};
use logpeek::app::{Transition, Viewer, ViewerEvent};
use logpeek::services::ingest::spawn_ingest;
use logpeek::services::terminal_modes::{self, TerminalModes};
use logpeek::services::{log_dirs, stdin_source, tracing_setup};
use logpeek::view::format::FormattedBlock;
use ratatui::Terminal;
use std::{
    io::{self, stdout},
    path::PathBuf,
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

/// Blocks appended per loop iteration before input events get a turn.
const MAX_BLOCKS_PER_TICK: usize = 1024;

/// A terminal viewer for newline-delimited JSON logs
#[derive(Parser, Debug)]
#[command(name = "logpeek")]
#[command(about = "Scroll through JSON log records as they stream in", long_about = None)]
#[command(version)]
struct Args {
    /// File to read records from instead of stdin. Use "-" for stdin.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to log file for viewer diagnostics (default: per-process file in the state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if let Err(e) = tracing_setup::init_global(&log_file) {
        eprintln!("Warning: diagnostics logging disabled: {:#}", e);
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("Viewer starting");

    // Must run before raw mode: it may take the log pipe off stdin
    let input = stdin_source::open_input(args.input.as_deref())?;
    let (blocks, _ingest_handle) = spawn_ingest(input)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut terminal_modes = TerminalModes::enable().context("Failed to set up terminal")?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let size = terminal.size()?;
    tracing::info!("Terminal size: {}x{}", size.width, size.height);

    let mut viewer = Viewer::new();
    viewer.handle_event(ViewerEvent::Resize(size.width, size.height));

    let result = run_event_loop(&mut viewer, &mut terminal, &blocks);

    // The ingestion thread may be parked in a blocking read; it is abandoned on exit.
    terminal_modes.undo();
    if let Err(e) = &result {
        tracing::error!("Event loop failed: {:#}", e);
    } else {
        tracing::info!("Viewer exiting");
    }
    result
}

/// Main event loop
fn run_event_loop(
    viewer: &mut Viewer,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    blocks: &Receiver<FormattedBlock>,
) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut needs_render = true;
    let mut input_open = true;

    loop {
        if input_open {
            let outcome = viewer.drain_blocks(blocks, MAX_BLOCKS_PER_TICK);
            if outcome.received > 0 {
                needs_render = true;
            }
            if outcome.disconnected {
                tracing::info!("Ingestion finished, {} blocks buffered", viewer.state().len());
                input_open = false;
            }
        }

        if viewer.is_stopped() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| viewer.draw(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };

        if !event_poll(timeout)? {
            continue;
        }

        let transition = match event_read()? {
            CrosstermEvent::Key(key_event) => viewer.handle_event(ViewerEvent::Key(key_event)),
            CrosstermEvent::Resize(width, height) => {
                viewer.handle_event(ViewerEvent::Resize(width, height))
            }
            _ => Transition::Unchanged,
        };

        match transition {
            Transition::Redraw => needs_render = true,
            Transition::Quit => break,
            Transition::Unchanged => {}
        }
    }

    Ok(())
}
