//! Drives a `Viewer` the way the binary does, against an in-memory terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use logpeek::app::{Transition, Viewer, ViewerEvent};
use logpeek::services::ingest::spawn_ingest;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io::Cursor;
use std::time::{Duration, Instant};

pub struct ViewerTestHarness {
    viewer: Viewer,
    terminal: Terminal<TestBackend>,
}

impl ViewerTestHarness {
    /// A viewer whose viewport has already received the initial resize.
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        super::tracing::init_tracing_from_env();

        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut viewer = Viewer::new();
        viewer.handle_event(ViewerEvent::Resize(width, height));
        Ok(Self { viewer, terminal })
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Run `input` through a real ingestion thread until it ends.
    pub fn ingest(&mut self, input: &str) -> anyhow::Result<usize> {
        let (receiver, handle) = spawn_ingest(Cursor::new(input.as_bytes().to_vec()))?;
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut received = 0;

        loop {
            let outcome = self.viewer.drain_blocks(&receiver, usize::MAX);
            received += outcome.received;
            if outcome.disconnected {
                break;
            }
            anyhow::ensure!(Instant::now() < deadline, "ingestion did not finish");
            std::thread::sleep(Duration::from_millis(1));
        }

        handle
            .join()
            .map_err(|_| anyhow::anyhow!("ingestion thread panicked"))?;
        Ok(received)
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Transition {
        self.viewer
            .handle_event(ViewerEvent::Key(KeyEvent::new(code, modifiers)))
    }

    pub fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<Transition> {
        self.terminal.backend_mut().resize(width, height);
        Ok(self.viewer.handle_event(ViewerEvent::Resize(width, height)))
    }

    pub fn offset(&self) -> usize {
        self.viewer.state().offset()
    }

    /// The plain-text frame, as produced by the viewport renderer.
    pub fn frame_text(&self) -> String {
        self.viewer.render()
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let viewer = &self.viewer;
        self.terminal.draw(|frame| viewer.draw(frame))?;
        Ok(())
    }

    /// Screen contents, one line per row with trailing blanks removed.
    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    /// Foreground color of the cell at (x, y).
    pub fn fg_at(&self, x: u16, y: u16) -> ratatui::style::Color {
        self.terminal.backend().buffer()[(x, y)].fg
    }
}
