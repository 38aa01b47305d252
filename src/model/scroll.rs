//! Scrollback buffer and viewport offset.
//!
//! The viewport is measured in blocks, not terminal rows: `viewport_height`
//! is the number of blocks shown at once and `offset` is the index of the
//! first visible block.

use crate::view::format::FormattedBlock;

/// All blocks received so far plus the current view into them.
///
/// After every mutation `offset <= max_offset()` holds, so when the buffer
/// fits in the viewport the offset is always 0.
#[derive(Debug, Default)]
pub struct ScrollState {
    blocks: Vec<FormattedBlock>,
    offset: usize,
    viewport_width: usize,
    viewport_height: usize,
}

impl ScrollState {
    /// Empty buffer with a zero-sized viewport.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[FormattedBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.blocks.len().saturating_sub(self.viewport_height)
    }

    /// Append a block and pin the view to the bottom.
    ///
    /// The view follows new data even if the user had scrolled up.
    pub fn append(&mut self, block: FormattedBlock) {
        self.blocks.push(block);
        if self.blocks.len() > self.viewport_height {
            self.offset = self.blocks.len() - self.viewport_height;
        }
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    /// Record new viewport dimensions. Existing blocks are not re-wrapped.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// The blocks visible in a viewport of `height` starting at the offset.
    pub fn current_window(&self, height: usize) -> &[FormattedBlock] {
        let start = self.offset.min(self.blocks.len());
        let end = self.offset.saturating_add(height).min(self.blocks.len());
        &self.blocks[start..end]
    }

    /// The blocks visible in the current viewport.
    pub fn visible(&self) -> &[FormattedBlock] {
        self.current_window(self.viewport_height)
    }
}
