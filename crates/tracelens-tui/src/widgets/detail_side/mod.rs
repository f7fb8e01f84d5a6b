//! # Detail Side Widget
//!
//! Paints a [`DetailSide`] view model: titled sections, key/value lists with
//! a fixed key column, the trailing card block and the planning timeline.
//! Serialised blocks are shown verbatim; lines wider than the panel are
//! clipped rather than wrapped so JSON indentation stays intact.


use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracelens_app::detail::{Card, DetailSide, DisplayNode, MetaKv, SectionBody, TimelineItem};
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

/// Lines of styled spans, built up before they become ratatui `Line`s.
type SpanLines = Vec<Vec<Span<'static>>>;

/// Widget that renders the detail panel for the selected task.
pub struct DetailPanel<'a> {
    detail: &'a DetailSide,
    /// Width of the key column in key/value lists.
    label_width: u16,
    /// First visible line.
    scroll: u16,
    focused: bool,
}

impl<'a> DetailPanel<'a> {
    pub fn new(detail: &'a DetailSide) -> Self {
        Self {
            detail,
            label_width: 10,
            scroll: 0,
            focused: false,
        }
    }

    pub fn label_width(mut self, width: u16) -> Self {
        self.label_width = width.max(1);
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// All content lines, before scrolling and clipping.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let trailing = self.detail.trailing_cards();
        let mut out: SpanLines = Vec::new();

        for (i, section) in self.detail.sections(&trailing).into_iter().enumerate() {
            if i > 0 {
                out.push(Vec::new());
            }
            if let Some(title) = section.title {
                out.push(vec![Span::styled(title.to_string(), styles::accent_bold())]);
            }
            match section.body {
                SectionBody::Kv(kv) => self.push_kv(&mut out, kv),
                SectionBody::Text(text) => {
                    for line in text.lines() {
                        out.push(vec![Span::styled(line.to_string(), styles::text_primary())]);
                    }
                }
                SectionBody::Cards(cards) => {
                    for (n, card) in cards.iter().enumerate() {
                        if n > 0 {
                            out.push(Vec::new());
                        }
                        push_card(&mut out, card);
                    }
                }
                SectionBody::Timeline(items) => {
                    for item in items {
                        push_timeline_item(&mut out, item);
                    }
                }
            }
        }

        out.into_iter().map(Line::from).collect()
    }

    fn push_kv(&self, out: &mut SpanLines, kv: &MetaKv) {
        let width = self.label_width as usize;
        for row in kv.rows() {
            let key = pad_to_width(&row.key, width);
            let mut content = node_lines(&row.content).into_iter();
            let mut first = vec![Span::styled(key, styles::text_muted())];
            first.extend(content.next().unwrap_or_default());
            out.push(first);
            for rest in content {
                let mut line = vec![Span::raw(" ".repeat(width))];
                line.extend(rest);
                out.push(line);
            }
        }
    }
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(Span::styled(
            " Detail ",
            styles::accent_bold(),
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Paragraph::new(self.lines())
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render one display node to one or more lines of spans.
fn node_lines(node: &DisplayNode) -> SpanLines {
    match node {
        DisplayNode::Text(s) => styled_lines(s, styles::text_primary()),
        DisplayNode::Code(s) => styled_lines(s, styles::text_secondary()),
        DisplayNode::Failure(s) => styled_lines(s, styles::failure()),
        DisplayNode::Bold(s) => styled_lines(s, styles::text_bold()),
        DisplayNode::Tag(s) => vec![vec![Span::styled(format!(" {} ", s), styles::element_tag())]],
        DisplayNode::Row(children) => {
            let mut lines: SpanLines = Vec::new();
            for child in children {
                let mut child_lines = node_lines(child).into_iter();
                match (lines.last_mut(), child_lines.next()) {
                    (Some(last), Some(head)) => {
                        last.push(Span::raw(" "));
                        last.extend(head);
                    }
                    (None, Some(head)) => lines.push(head),
                    (_, None) => {}
                }
                lines.extend(child_lines);
            }
            lines
        }
    }
}

fn styled_lines(text: &str, style: ratatui::style::Style) -> SpanLines {
    if text.is_empty() {
        return vec![Vec::new()];
    }
    text.lines()
        .map(|line| vec![Span::styled(line.to_string(), style)])
        .collect()
}

fn push_card(out: &mut SpanLines, card: &Card) {
    let gutter = styles::card_gutter(card.highlight);
    let (head, body) = if card.lite {
        ("", "  ")
    } else {
        ("┌ ", "│ ")
    };

    if let Some(title) = &card.title {
        out.push(vec![
            Span::styled(head, gutter),
            Span::styled(title.clone(), styles::text_bold()),
        ]);
    }
    if let Some(subtitle) = card.subtitle.as_ref().filter(|s| !s.is_empty()) {
        out.push(vec![
            Span::styled(body, gutter),
            Span::styled(subtitle.clone(), styles::text_muted()),
        ]);
    }
    for node in &card.content {
        for line in node_lines(node) {
            let mut prefixed = vec![Span::styled(body, gutter)];
            prefixed.extend(line);
            out.push(prefixed);
        }
    }
    if !card.lite {
        out.push(vec![Span::styled("└", gutter)]);
    }
}

fn push_timeline_item(out: &mut SpanLines, item: &TimelineItem) {
    for (i, paragraph) in item.paragraphs.iter().enumerate() {
        for (j, line) in node_lines(paragraph).into_iter().enumerate() {
            let marker = if i == 0 && j == 0 { "● " } else { "│ " };
            let mut prefixed = vec![Span::styled(marker, styles::timeline_dot())];
            prefixed.extend(line);
            out.push(prefixed);
        }
    }
}

/// Pad (or clip) `s` to exactly `width` display columns, leaving one column
/// of separation when clipped.
fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() < width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    let mut clipped = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        clipped.push(ch);
        used += w;
    }
    format!("{}{}", clipped, " ".repeat(width - used))
}
