//! Turning decoded records into display blocks.

use crate::model::record::{LogRecord, Payload};
use crate::view::theme::severity_color;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Body of the block emitted when reading the input stream fails.
pub const READ_ERROR_NOTICE: &str = "error reading stdin";

/// Header line of a block: `<timestamp> | <namespace> | <severity>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub timestamp: String,
    pub namespace: String,
    pub severity: String,
    /// Foreground color of the timestamp.
    pub color: Color,
}

/// Immutable display text for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock {
    header: Option<BlockHeader>,
    body: String,
}

impl FormattedBlock {
    /// A header-less block carrying a notice instead of a record.
    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self {
            header: None,
            body: message.into(),
        }
    }

    pub fn header(&self) -> Option<&BlockHeader> {
        self.header.as_ref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Plain text of the block, without styling.
    pub fn text(&self) -> String {
        match &self.header {
            Some(h) => format!(
                "{} | {} | {}\n{}",
                h.timestamp, h.namespace, h.severity, self.body
            ),
            None => self.body.clone(),
        }
    }

    /// Styled terminal lines for the block.
    pub fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        if let Some(h) = &self.header {
            lines.push(Line::from(vec![
                Span::styled(h.timestamp.as_str(), Style::default().fg(h.color)),
                Span::raw(format!(" | {} | {}", h.namespace, h.severity)),
            ]));
        }
        lines.extend(self.body.split('\n').map(Line::raw));
        lines
    }
}

/// Format a decoded record. Never fails; missing fields show as empty text.
pub fn format_record(record: &LogRecord) -> FormattedBlock {
    FormattedBlock {
        header: Some(BlockHeader {
            timestamp: record.timestamp.clone(),
            namespace: record.namespace.clone(),
            severity: record.severity.clone(),
            color: severity_color(&record.severity),
        }),
        body: render_payload(&record.payload),
    }
}

/// String payloads verbatim, anything else pretty-printed with 2-space indents.
fn render_payload(payload: &Payload) -> String {
    match payload {
        Payload::Text(s) => s.clone(),
        // Serializing a Value cannot fail.
        Payload::Structured(v) => serde_json::to_string_pretty(v).unwrap_or_default(),
    }
}
