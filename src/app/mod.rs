//! The viewer state machine.
//!
//! `Viewer` owns the scrollback state and is driven by exactly one caller, the
//! event loop. New blocks, key presses and resizes all arrive through
//! [`Viewer::handle_event`], which reports whether the frame must be redrawn.

use crate::input::keybindings::{command_for, Command};
use crate::model::scroll::ScrollState;
use crate::view::format::FormattedBlock;
use crate::view::viewport;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Input to the viewer.
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// A block produced by ingestion.
    Block(FormattedBlock),
    Key(KeyEvent),
    /// New terminal size as (width, height).
    Resize(u16, u16),
}

/// Result of pulling ready blocks from the ingestion channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainOutcome {
    pub received: usize,
    /// The producer has finished and no more blocks will arrive.
    pub disconnected: bool,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Redraw,
    Unchanged,
    Quit,
}

pub struct Viewer {
    state: ScrollState,
    stopped: bool,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer {
    /// A running viewer with an empty buffer and a zero-height viewport.
    pub fn new() -> Self {
        Self {
            state: ScrollState::new(),
            stopped: false,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn handle_event(&mut self, event: ViewerEvent) -> Transition {
        if self.stopped {
            return Transition::Unchanged;
        }

        match event {
            ViewerEvent::Block(block) => {
                self.state.append(block);
                Transition::Redraw
            }
            ViewerEvent::Resize(width, height) => {
                tracing::debug!("Viewport resized to {}x{}", width, height);
                self.state.resize(width as usize, height as usize);
                Transition::Redraw
            }
            ViewerEvent::Key(key_event) => self.handle_key(&key_event),
        }
    }

    fn handle_key(&mut self, key_event: &KeyEvent) -> Transition {
        tracing::trace!(
            "Key event received: code={:?}, modifiers={:?}, kind={:?}",
            key_event.code,
            key_event.modifiers,
            key_event.kind
        );

        match command_for(key_event) {
            Some(Command::ScrollUp) => {
                self.state.scroll_up();
                Transition::Redraw
            }
            Some(Command::ScrollDown) => {
                self.state.scroll_down();
                Transition::Redraw
            }
            Some(Command::Quit) => {
                tracing::info!("Quit requested");
                self.stopped = true;
                Transition::Quit
            }
            None => Transition::Unchanged,
        }
    }

    /// Append every block the producer has ready, up to `limit`, without blocking.
    pub fn drain_blocks(
        &mut self,
        receiver: &Receiver<FormattedBlock>,
        limit: usize,
    ) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        while outcome.received < limit && !self.stopped {
            match receiver.try_recv() {
                Ok(block) => {
                    self.handle_event(ViewerEvent::Block(block));
                    outcome.received += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    outcome.disconnected = true;
                    break;
                }
            }
        }
        outcome
    }

    /// Plain text of the current frame.
    pub fn render(&self) -> String {
        viewport::render(&self.state)
    }

    pub fn draw(&self, frame: &mut Frame) {
        viewport::draw(frame, &self.state);
    }
}
