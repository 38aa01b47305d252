//! Painting the visible slice of the scrollback buffer.

use crate::model::scroll::ScrollState;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Plain text of the visible blocks, each followed by a newline.
///
/// No wrapping or truncation by width happens here. An empty buffer or a
/// zero-height viewport renders as the empty string.
pub fn render(state: &ScrollState) -> String {
    let mut out = String::new();
    for block in state.visible() {
        out.push_str(&block.text());
        out.push('\n');
    }
    out
}

/// Draw the visible blocks, styled, into the whole frame.
///
/// The viewport counts blocks, so the window can hold more rows than the
/// frame. In that case the top rows are dropped and the newest rows stay on
/// screen.
pub fn draw(frame: &mut Frame, state: &ScrollState) {
    let area = frame.area();
    let mut lines = state
        .visible()
        .iter()
        .flat_map(|block| block.lines())
        .collect::<Vec<_>>();
    let overflow = lines.len().saturating_sub(area.height as usize);
    lines.drain(..overflow);
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::decode;
    use crate::view::format::{format_record, FormattedBlock};
    use proptest::prelude::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn state_with(height: usize, bodies: &[&str]) -> ScrollState {
        let mut state = ScrollState::new();
        state.resize(80, height);
        for body in bodies {
            state.append(FormattedBlock::diagnostic(*body));
        }
        state
    }

    fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_render_empty_buffer() {
        assert_eq!(render(&state_with(10, &[])), "");
    }

    #[test]
    fn test_render_zero_height() {
        assert_eq!(render(&state_with(0, &["a", "b"])), "");
    }

    #[test]
    fn test_render_concatenates_window() {
        let state = state_with(2, &["a", "b", "c"]);
        assert_eq!(render(&state), "b\nc\n");
    }

    #[test]
    fn test_draw_paints_visible_blocks() {
        let state = state_with(2, &["first", "second", "third\nmore"]);
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();

        assert_eq!(screen_rows(&terminal), vec!["second", "third", "more", ""]);
    }

    #[test]
    fn test_draw_keeps_bottom_rows_on_overflow() {
        let state = state_with(3, &["a\nb", "c\nd", "e\nf"]);
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();

        assert_eq!(screen_rows(&terminal), vec!["d", "e", "f"]);
    }

    #[test]
    fn test_draw_shows_newest_block_when_following() {
        // Four two-row blocks in a four-row viewport
        let mut state = ScrollState::new();
        state.resize(40, 4);
        for n in 0..6 {
            let line = format!(
                r#"{{"namespace":"n{n}","time":"t{n}","priority":"debug","payload":"p{n}"}}"#
            );
            state.append(format_record(&decode(&line).unwrap()));
        }
        assert_eq!(state.offset(), 2);

        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();

        assert_eq!(
            screen_rows(&terminal),
            vec!["t4 | n4 | debug", "p4", "t5 | n5 | debug", "p5"]
        );
    }

    proptest! {
        /// Property: rendering is a pure function of the state
        #[test]
        fn render_is_idempotent(height in 0usize..8, count in 0usize..20, ups in 0usize..10) {
            let bodies: Vec<String> = (0..count).map(|n| format!("line {}", n)).collect();
            let refs: Vec<&str> = bodies.iter().map(String::as_str).collect();
            let mut state = state_with(height, &refs);
            for _ in 0..ups {
                state.scroll_up();
            }
            let first = render(&state);
            prop_assert_eq!(&first, &render(&state));
            prop_assert_eq!(first.lines().count(), count.min(height));
        }
    }
}
