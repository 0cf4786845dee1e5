// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Two panes, disassembly left and structured text right, with mouse hover
//! and click synchronized across panes by source offset.

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block as PanelBlock, Borders, Paragraph},
};

use crate::color::OffsetPalette;
use crate::model::{ModuleListing, Offset};
use crate::query::{BlockRef, OffsetIndex, Pane};
use crate::render::{build_disasm_view, build_text_view, Block, DisasmView, TextView};
use crate::ui::LinkState;

const FOCUS_COLOR: Color = Color::LightGreen;
const HEADER_COLOR: Color = Color::Gray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const SCROLL_WHEEL_STEP: usize = 3;

/// Runs the interactive viewer for one module listing.
pub fn run(listing: ModuleListing) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(listing);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    app.set_pane_area(Pane::Disasm, panes[0]);
    app.set_pane_area(Pane::Text, panes[1]);
    app.flush_scroll_request();

    for pane in [Pane::Disasm, Pane::Text] {
        let title = match pane {
            Pane::Disasm => " Disassembly ",
            Pane::Text => " Structured text ",
        };
        let border_style = if app.focus == pane {
            Style::default().fg(FOCUS_COLOR)
        } else {
            Style::default()
        };

        let text = app.pane_text(pane);
        let widget = Paragraph::new(text)
            .block(
                PanelBlock::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            )
            .scroll((app.scroll(pane) as u16, 0));
        frame.render_widget(widget, app.pane_area(pane));
    }

    let status = Paragraph::new(footer_line(app));
    frame.render_widget(status, layout[1]);
    let brand = Paragraph::new(Line::from(Span::styled(
        app.listing_name.clone(),
        Style::default().fg(FOOTER_LABEL_COLOR),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(brand, layout[1]);
}

fn footer_line(app: &App) -> Line<'static> {
    let key = Style::default().fg(FOOTER_KEY_COLOR);
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    let mut spans = vec![
        Span::styled(" q", key),
        Span::styled(" quit  ", label),
        Span::styled("tab", key),
        Span::styled(" focus  ", label),
        Span::styled("hover", key),
        Span::styled(" link  ", label),
        Span::styled("click", key),
        Span::styled(" sync ", label),
    ];
    if let Some(offset) = app.link.hovered_offset() {
        spans.push(Span::styled(format!("| offset {offset:#x}"), label));
    }
    Line::from(spans)
}

/// One display line of a pane, optionally backed by a block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DisplayLine {
    text: String,
    block: Option<BlockRef>,
    is_header: bool,
}

/// A pane flattened to display lines, plus the line span of each block so
/// click-to-center can scroll straight to it.
#[derive(Debug, Clone, Default)]
struct PaneLayout {
    lines: Vec<DisplayLine>,
    spans: Vec<(BlockRef, usize, usize)>,
}

impl PaneLayout {
    fn push_block(&mut self, block_ref: BlockRef, text: &str) {
        let start = self.lines.len();
        for line in text.split('\n') {
            self.lines.push(DisplayLine {
                text: line.to_owned(),
                block: Some(block_ref),
                is_header: false,
            });
        }
        self.spans.push((block_ref, start, self.lines.len() - 1));
    }

    fn push_plain(&mut self, text: impl Into<String>, is_header: bool) {
        self.lines.push(DisplayLine {
            text: text.into(),
            block: None,
            is_header,
        });
    }

    fn span_of(&self, block_ref: BlockRef) -> Option<(usize, usize)> {
        self.spans
            .iter()
            .find(|(candidate, _, _)| *candidate == block_ref)
            .map(|(_, start, end)| (*start, *end))
    }
}

fn layout_disasm_pane(view: &DisasmView, index: &OffsetIndex) -> PaneLayout {
    let mut layout = PaneLayout::default();
    for (function, func_view) in view.functions().iter().enumerate() {
        layout.push_plain(func_view.header().to_owned(), true);
        for (idx, block) in func_view.blocks().iter().enumerate() {
            let block_ref = block.offset().and_then(|offset| {
                index.blocks_at(offset).iter().copied().find(|r| {
                    r.pane() == Pane::Disasm && r.function() == Some(function) && r.block() == idx
                })
            });
            match block_ref {
                Some(block_ref) => layout.push_block(block_ref, block.text()),
                // Offsetless blocks render but stay non-interactive.
                None => {
                    for line in block.text().split('\n') {
                        layout.push_plain(line.to_owned(), false);
                    }
                }
            }
        }
        layout.push_plain(String::new(), false);
    }
    layout
}

fn layout_text_pane(view: &TextView, index: &OffsetIndex) -> PaneLayout {
    let mut layout = PaneLayout::default();
    for (idx, block) in view.blocks().iter().enumerate() {
        let block_ref = block.offset().and_then(|offset| {
            index
                .blocks_at(offset)
                .iter()
                .copied()
                .find(|r| r.pane() == Pane::Text && r.block() == idx)
        });
        match block_ref {
            Some(block_ref) => layout.push_block(block_ref, block.text()),
            None => {
                for line in block.text().split('\n') {
                    layout.push_plain(line.to_owned(), false);
                }
            }
        }
    }
    layout
}

struct App {
    listing_name: String,
    disasm: DisasmView,
    text: TextView,
    index: OffsetIndex,
    disasm_layout: PaneLayout,
    text_layout: PaneLayout,
    link: LinkState,
    focus: Pane,
    disasm_scroll: usize,
    text_scroll: usize,
    disasm_area: Rect,
    text_area: Rect,
    should_quit: bool,
}

impl App {
    fn new(listing: ModuleListing) -> Self {
        let mut palette = OffsetPalette::new();
        let disasm = build_disasm_view(listing.disasm(), &mut palette);
        let text = build_text_view(listing.text(), &mut palette);
        let index = OffsetIndex::build(&disasm, &text);
        let disasm_layout = layout_disasm_pane(&disasm, &index);
        let text_layout = layout_text_pane(&text, &index);

        Self {
            listing_name: listing.name().to_owned(),
            disasm,
            text,
            index,
            disasm_layout,
            text_layout,
            link: LinkState::default(),
            focus: Pane::Disasm,
            disasm_scroll: 0,
            text_scroll: 0,
            disasm_area: Rect::default(),
            text_area: Rect::default(),
            should_quit: false,
        }
    }

    fn layout(&self, pane: Pane) -> &PaneLayout {
        match pane {
            Pane::Disasm => &self.disasm_layout,
            Pane::Text => &self.text_layout,
        }
    }

    fn block(&self, block_ref: BlockRef) -> Option<&Block> {
        match block_ref.pane() {
            Pane::Disasm => self
                .disasm
                .functions()
                .get(block_ref.function()?)?
                .blocks()
                .get(block_ref.block()),
            Pane::Text => self.text.blocks().get(block_ref.block()),
        }
    }

    fn scroll(&self, pane: Pane) -> usize {
        match pane {
            Pane::Disasm => self.disasm_scroll,
            Pane::Text => self.text_scroll,
        }
    }

    fn scroll_mut(&mut self, pane: Pane) -> &mut usize {
        match pane {
            Pane::Disasm => &mut self.disasm_scroll,
            Pane::Text => &mut self.text_scroll,
        }
    }

    fn set_pane_area(&mut self, pane: Pane, area: Rect) {
        match pane {
            Pane::Disasm => self.disasm_area = area,
            Pane::Text => self.text_area = area,
        }
    }

    fn pane_area(&self, pane: Pane) -> Rect {
        match pane {
            Pane::Disasm => self.disasm_area,
            Pane::Text => self.text_area,
        }
    }

    fn pane_inner(&self, pane: Pane) -> Rect {
        let area = self.pane_area(pane);
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }

    fn max_scroll(&self, pane: Pane) -> usize {
        let viewport = self.pane_inner(pane).height as usize;
        self.layout(pane).lines.len().saturating_sub(viewport)
    }

    fn clamp_scrolls(&mut self) {
        self.disasm_scroll = self.disasm_scroll.min(self.max_scroll(Pane::Disasm));
        self.text_scroll = self.text_scroll.min(self.max_scroll(Pane::Text));
    }

    fn pane_text(&self, pane: Pane) -> Text<'static> {
        let hovered = self.link.hovered_offset();
        let mut out = Text::default();
        for line in &self.layout(pane).lines {
            let style = self.line_style(line, hovered);
            out.lines
                .push(Line::from(Span::styled(line.text.clone(), style)));
        }
        out
    }

    fn line_style(&self, line: &DisplayLine, hovered: Option<Offset>) -> Style {
        if line.is_header {
            return Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD);
        }
        let Some(block) = line.block.and_then(|r| self.block(r)) else {
            return Style::default();
        };
        let Some(color) = block.color() else {
            return Style::default();
        };

        let mut style = Style::default().fg(color.fg().into()).bg(color.bg().into());
        if block.offset().is_some() && block.offset() == hovered {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        style
    }

    /// Maps a terminal cell to the colored block under it, if any.
    fn hit_test(&self, column: u16, row: u16) -> Option<BlockRef> {
        for pane in [Pane::Disasm, Pane::Text] {
            let inner = self.pane_inner(pane);
            let inside = column >= inner.x
                && column < inner.x + inner.width
                && row >= inner.y
                && row < inner.y + inner.height;
            if !inside {
                continue;
            }
            let line_idx = (row - inner.y) as usize + self.scroll(pane);
            return self.layout(pane).lines.get(line_idx)?.block;
        }
        None
    }

    fn offset_at(&self, column: u16, row: u16) -> Option<Offset> {
        let block = self.hit_test(column, row).and_then(|r| self.block(r))?;
        block.offset().filter(|_| block.is_colored())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Pane::Disasm => Pane::Text,
                    Pane::Text => Pane::Disasm,
                };
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(self.focus, 1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(self.focus, -1),
            KeyCode::PageDown => {
                let page = self.pane_inner(self.focus).height.max(1) as i32;
                self.scroll_by(self.focus, page);
            }
            KeyCode::PageUp => {
                let page = self.pane_inner(self.focus).height.max(1) as i32;
                self.scroll_by(self.focus, -page);
            }
            KeyCode::Home | KeyCode::Char('g') => *self.scroll_mut(self.focus) = 0,
            KeyCode::End | KeyCode::Char('G') => {
                *self.scroll_mut(self.focus) = self.max_scroll(self.focus);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => {
                let offset = self.offset_at(mouse.column, mouse.row);
                self.link.set_hovered_offset(offset);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(offset) = self.offset_at(mouse.column, mouse.row) {
                    self.link.request_scroll(offset);
                }
            }
            MouseEventKind::ScrollDown => {
                let pane = self.pane_under(mouse.column, mouse.row).unwrap_or(self.focus);
                self.scroll_by(pane, SCROLL_WHEEL_STEP as i32);
            }
            MouseEventKind::ScrollUp => {
                let pane = self.pane_under(mouse.column, mouse.row).unwrap_or(self.focus);
                self.scroll_by(pane, -(SCROLL_WHEEL_STEP as i32));
            }
            _ => {}
        }
    }

    fn pane_under(&self, column: u16, row: u16) -> Option<Pane> {
        for pane in [Pane::Disasm, Pane::Text] {
            let area = self.pane_area(pane);
            if column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
            {
                return Some(pane);
            }
        }
        None
    }

    fn scroll_by(&mut self, pane: Pane, delta: i32) {
        let max = self.max_scroll(pane);
        let scroll = self.scroll_mut(pane);
        if delta < 0 {
            *scroll = scroll.saturating_sub((-delta) as usize);
        } else {
            *scroll = scroll.saturating_add(delta as usize).min(max);
        }
    }

    /// Applies a pending click: center the first matching block of each pane.
    fn flush_scroll_request(&mut self) {
        let Some(offset) = self.link.take_scroll_target() else {
            self.clamp_scrolls();
            return;
        };
        for pane in [Pane::Disasm, Pane::Text] {
            if let Some(target) = self.center_target(pane, offset) {
                *self.scroll_mut(pane) = target;
            }
        }
        self.clamp_scrolls();
    }

    fn center_target(&self, pane: Pane, offset: Offset) -> Option<usize> {
        let block_ref = self
            .index
            .blocks_at(offset)
            .iter()
            .copied()
            .find(|r| r.pane() == pane)?;
        let (start, end) = self.layout(pane).span_of(block_ref)?;
        let viewport = self.pane_inner(pane).height as usize;
        let mid = (start + end) / 2;
        Some(
            mid.saturating_sub(viewport / 2)
                .min(self.max_scroll(pane)),
        )
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use ratatui::prelude::Rect;

    use crate::model::demo_listing;
    use crate::query::Pane;

    use super::App;

    fn app_with_viewports() -> App {
        let mut app = App::new(demo_listing());
        app.set_pane_area(Pane::Disasm, Rect::new(0, 0, 40, 20));
        app.set_pane_area(Pane::Text, Rect::new(40, 0, 40, 20));
        app
    }

    #[test]
    fn panes_are_laid_out_with_headers_and_blocks() {
        let app = app_with_viewports();

        let first = &app.disasm_layout.lines[0];
        assert!(first.is_header);
        assert_eq!(first.text, "Disassembly of function <add>:");
        assert!(app.disasm_layout.lines[1].block.is_some());

        // Text pane has one line per colored/tagged chunk line, no headers.
        assert!(app.text_layout.lines.iter().all(|line| !line.is_header));
    }

    #[test]
    fn hover_links_blocks_across_panes() {
        let mut app = app_with_viewports();

        // Row 1 is the first instruction block of the disasm pane.
        let offset = app.offset_at(2, 2).expect("offset under cursor");
        assert_eq!(offset, 0x23);
        app.link.set_hovered_offset(Some(offset));

        // Both panes contain a block tagged 0x23; only those highlight.
        let matches = app.index.blocks_at(offset);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().any(|r| r.pane() == Pane::Text));
        for r in app.index.blocks_at(0x27) {
            let block = app.block(*r).expect("block");
            assert_ne!(block.offset(), Some(offset));
        }
    }

    #[test]
    fn hover_outside_blocks_clears_the_highlight() {
        let mut app = app_with_viewports();
        app.link.set_hovered_offset(Some(0x23));

        // The function header row carries no block.
        assert_eq!(app.offset_at(2, 1), None);
        app.link.set_hovered_offset(app.offset_at(2, 1));
        assert_eq!(app.link.hovered_offset(), None);
    }

    #[test]
    fn late_text_chunks_are_not_interactive() {
        let app = app_with_viewports();

        // Offset 0x41 exists only in the text pane and is uncolored.
        let line = app
            .text_layout
            .lines
            .iter()
            .find(|line| line.text.contains("(table"))
            .expect("table chunk line");
        assert!(line.block.is_none());
        assert!(app.index.blocks_at(0x41).is_empty());
    }

    #[test]
    fn click_centers_both_panes_on_the_offset() {
        let mut app = app_with_viewports();
        app.link.request_scroll(0x39);
        app.flush_scroll_request();

        // 0x39 sits near the end of both panes; both should have scrolled.
        let disasm_target = app.center_target(Pane::Disasm, 0x39).expect("disasm target");
        let text_target = app.center_target(Pane::Text, 0x39).expect("text target");
        assert_eq!(app.scroll(Pane::Disasm), disasm_target);
        assert_eq!(app.scroll(Pane::Text), text_target);
    }

    #[test]
    fn scrolling_clamps_to_content() {
        let mut app = app_with_viewports();
        app.scroll_by(Pane::Disasm, 10_000);
        assert_eq!(app.scroll(Pane::Disasm), app.max_scroll(Pane::Disasm));
        app.scroll_by(Pane::Disasm, -10_000);
        assert_eq!(app.scroll(Pane::Disasm), 0);
    }
}
