//! UI rendering
//!
//! Layout:
//! - Title bar (1 line)
//! - Middle section: outline pane (fixed width) and file pane
//! - Status bar (1 line)

use super::app::App;
use super::model::{Focus, Model};
use super::theme::Theme;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use synscan::StyledSpan;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 50;
/// Width allocated to the outline pane
const OUTLINE_WIDTH: u16 = 32;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App, file_name: &str) {
    let theme = Theme::default();
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        let msg = format!(
            "Terminal too narrow: {} < {} chars",
            size.width, MIN_TERMINAL_WIDTH
        );
        frame.render_widget(Paragraph::new(msg).style(theme.error_message()), size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(frame, chunks[0], app, file_name, &theme);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(OUTLINE_WIDTH), Constraint::Min(1)])
        .split(chunks[1]);
    render_outline(frame, panes[0], app, &theme);
    render_file(frame, panes[1], app, &theme);

    render_status_bar(frame, chunks[2], &app.model, &theme);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, file_name: &str, theme: &Theme) {
    let language = app
        .model
        .language()
        .map(|l| l.spec().display_name().to_string())
        .unwrap_or_else(|| "plain text".to_string());
    let title = format!("synscan:: {} [{}]", file_name, language);
    frame.render_widget(Paragraph::new(title).style(theme.title_bar()), area);
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let title = if focused {
        format!("{} [FOCUSED]", title)
    } else {
        title.to_string()
    };
    Block::default().borders(Borders::ALL).title(title)
}

/// First row to draw so that `selected` stays inside a pane of `height` rows
fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 || selected < height {
        0
    } else {
        selected + 1 - height
    }
}

fn render_outline(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = pane_block("Outline", app.focus == Focus::OutlineViewer);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let outline = app.model.outline();
    if outline.is_empty() {
        frame.render_widget(Paragraph::new("(no symbols)"), inner);
        return;
    }

    let selected = outline.selected_index();
    let top = scroll_offset(selected.unwrap_or(0), inner.height as usize);
    let lines: Vec<Line> = outline
        .symbols()
        .iter()
        .enumerate()
        .skip(top)
        .take(inner.height as usize)
        .map(|(index, symbol)| {
            let line = Line::from(symbol.label.as_str());
            if Some(index) == selected {
                line.style(theme.outline_selected())
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_file(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = pane_block("File", app.focus == Focus::FileViewer);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let model = &app.model;
    let top = scroll_offset(model.cursor(), inner.height as usize);
    let gutter = model.line_count().to_string().len();
    let lines: Vec<Line> = (top..model.line_count())
        .take(inner.height as usize)
        .map(|index| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", index + 1, width = gutter),
                theme.status_label(),
            )];
            spans.extend(styled_spans(model.line(index), model.line_styles(index), theme));
            let line = Line::from(spans);
            if index == model.cursor() {
                line.patch_style(theme.file_viewer_cursor())
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Cut a line into terminal spans along its styled ranges
///
/// Gaps between ranges keep the default style. Ranges are expected sorted and on
/// character boundaries; anything outside the line is dropped.
pub fn styled_spans<'a>(text: &'a str, styles: &[StyledSpan], theme: &Theme) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut pos = 0;
    for styled in styles {
        let start = styled.start.min(text.len()).max(pos);
        let end = styled.end().min(text.len());
        if start >= end {
            continue;
        }
        if let (Some(gap), Some(piece)) = (text.get(pos..start), text.get(start..end)) {
            if !gap.is_empty() {
                spans.push(Span::raw(gap));
            }
            spans.push(Span::styled(piece, theme.syntax(styled.style)));
            pos = end;
        }
    }
    if let Some(rest) = text.get(pos..) {
        if !rest.is_empty() {
            spans.push(Span::raw(rest));
        }
    }
    spans
}

fn render_status_bar(frame: &mut Frame, area: Rect, model: &Model, theme: &Theme) {
    let position = format!(
        " line {}/{} ",
        model.cursor() + 1,
        model.line_count().max(1)
    );
    let mut spans = vec![Span::styled(position, theme.status_label())];

    match model.diagnostics().first() {
        Some(diagnostic) => spans.push(Span::styled(
            diagnostic.to_string(),
            theme.error_message(),
        )),
        None => spans.push(Span::raw("Tab focus | Enter jump | r refresh | q quit")),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
