//! HTML-like labels: raw markup values, table builders, and the Markdown
//! converter.

use crate::error::Result;
use crate::value::AttrValue;

/// Wraps a markup body as a raw label value.
pub fn html_label(body: impl Into<String>) -> AttrValue {
    AttrValue::raw(body)
}

/// Escapes text for embedding in an HTML-like label.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One block of rows in a [`table_html`] label.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub rows: Vec<String>,
    pub align: &'static str,
}

impl Section {
    pub fn left(rows: Vec<String>) -> Self {
        Self { rows, align: "LEFT" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFrame {
    pub border: u32,
    pub cellborder: u32,
    pub cellspacing: u32,
    pub cellpadding: u32,
}

impl Default for TableFrame {
    fn default() -> Self {
        Self {
            border: 0,
            cellborder: 1,
            cellspacing: 0,
            cellpadding: 4,
        }
    }
}

/// A bordered table with a bold title row followed by section rows.
///
/// `title` and rows are inserted as-is; escape them first if needed.
pub fn table_html(title: &str, sections: &[Section], frame: TableFrame) -> String {
    let mut lines = vec![format!(
        "<TABLE BORDER=\"{}\" CELLBORDER=\"{}\" CELLSPACING=\"{}\" CELLPADDING=\"{}\">",
        frame.border, frame.cellborder, frame.cellspacing, frame.cellpadding
    )];
    lines.push(format!("  <TR><TD><B>{title}</B></TD></TR>"));
    for section in sections {
        for row in &section.rows {
            lines.push(format!("  <TR><TD ALIGN=\"{}\">{row}</TD></TR>", section.align));
        }
    }
    lines.push("</TABLE>".to_string());
    lines.join("\n")
}

/// Converts Markdown to a single-table HTML-like label.
#[cfg(feature = "markdown")]
pub fn markdown_to_label(text: &str) -> Result<AttrValue> {
    Ok(AttrValue::raw(markdown::to_table(text)))
}

#[cfg(not(feature = "markdown"))]
pub fn markdown_to_label(_text: &str) -> Result<AttrValue> {
    tracing::warn!("markdown label requested without the markdown feature");
    Err(crate::error::Error::FeatureUnavailable { feature: "markdown" })
}

#[cfg(feature = "markdown")]
mod markdown {
    use pulldown_cmark::{Alignment, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

    use super::escape_html;

    const BULLET: &str = "&#8226; ";
    const RULE: &str = "──────────────────";

    #[derive(Debug)]
    enum Block {
        Root,
        Paragraph,
        Heading(HeadingLevel),
        Emphasis,
        Strong,
        Strikethrough,
        Link,
        Image,
        List(Option<u64>),
        Item(String),
        CodeBlock,
        BlockQuote,
        Table,
        TableHead,
        TableRow,
        TableCell,
        Other,
    }

    struct Frame {
        block: Block,
        buf: String,
    }

    #[derive(Default)]
    struct TableState {
        alignments: Vec<Alignment>,
        in_head: bool,
        column: usize,
    }

    struct LabelWriter {
        stack: Vec<Frame>,
        table: TableState,
    }

    fn point_size(level: HeadingLevel) -> u32 {
        match level {
            HeadingLevel::H1 => 20,
            HeadingLevel::H2 => 18,
            HeadingLevel::H3 => 16,
            HeadingLevel::H4 => 14,
            HeadingLevel::H5 => 12,
            HeadingLevel::H6 => 11,
        }
    }

    fn row(content: &str) -> String {
        format!("<TR><TD ALIGN=\"LEFT\">{content}</TD></TR>")
    }

    fn nested_row(table: &str) -> String {
        format!("<TR><TD>{table}</TD></TR>")
    }

    impl LabelWriter {
        fn new() -> Self {
            Self {
                stack: vec![Frame {
                    block: Block::Root,
                    buf: String::new(),
                }],
                table: TableState::default(),
            }
        }

        fn push_str(&mut self, s: &str) {
            if let Some(frame) = self.stack.last_mut() {
                frame.buf.push_str(s);
            }
        }

        fn open(&mut self, block: Block) {
            self.stack.push(Frame {
                block,
                buf: String::new(),
            });
        }

        fn parent_is_item(&self) -> bool {
            matches!(self.stack.last(), Some(Frame { block: Block::Item(_), .. }))
        }

        fn next_marker(&mut self) -> String {
            let list = self.stack.iter_mut().rev().find_map(|frame| match &mut frame.block {
                Block::List(start) => Some(start),
                _ => None,
            });
            match list {
                Some(Some(n)) => {
                    let marker = format!("{n}. ");
                    *n += 1;
                    marker
                }
                _ => BULLET.to_string(),
            }
        }

        fn start(&mut self, tag: Tag) {
            let block = match tag {
                Tag::Paragraph => Block::Paragraph,
                Tag::Heading { level, .. } => Block::Heading(level),
                Tag::Emphasis => Block::Emphasis,
                Tag::Strong => Block::Strong,
                Tag::Strikethrough => Block::Strikethrough,
                Tag::Link { .. } => Block::Link,
                Tag::Image { .. } => Block::Image,
                Tag::List(start) => Block::List(start),
                Tag::Item => Block::Item(self.next_marker()),
                Tag::CodeBlock(_) => Block::CodeBlock,
                Tag::BlockQuote(..) => Block::BlockQuote,
                Tag::Table(alignments) => {
                    self.table = TableState {
                        alignments,
                        ..TableState::default()
                    };
                    Block::Table
                }
                Tag::TableHead => {
                    self.table.in_head = true;
                    self.table.column = 0;
                    Block::TableHead
                }
                Tag::TableRow => {
                    self.table.column = 0;
                    Block::TableRow
                }
                Tag::TableCell => Block::TableCell,
                _ => Block::Other,
            };
            self.open(block);
        }

        fn end(&mut self, _tag: TagEnd) {
            if self.stack.len() <= 1 {
                return;
            }
            let Some(frame) = self.stack.pop() else {
                return;
            };
            let text = frame.buf;
            let rendered = match frame.block {
                Block::Root | Block::Other => text,
                Block::Paragraph => {
                    let text = text.trim_end();
                    if self.parent_is_item() || text.is_empty() {
                        text.to_string()
                    } else {
                        row(text)
                    }
                }
                Block::Heading(level) => row(&format!(
                    "<FONT POINT-SIZE=\"{}\"><B>{text}</B></FONT>",
                    point_size(level)
                )),
                Block::Emphasis => format!("<I>{text}</I>"),
                Block::Strong => format!("<B>{text}</B>"),
                Block::Strikethrough => format!("<S>{text}</S>"),
                Block::Link => text,
                Block::Image if text.is_empty() => "[image]".to_string(),
                Block::Image => format!("[{text}]"),
                Block::List(_) => {
                    let table = format!(
                        "<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\" CELLPADDING=\"2\">{text}</TABLE>"
                    );
                    if self.parent_is_item() { table } else { nested_row(&table) }
                }
                Block::Item(marker) => row(&format!("{marker}{text}")),
                Block::CodeBlock => {
                    let rows: String = text
                        .trim_end()
                        .split('\n')
                        .map(|line| {
                            let line = if line.trim().is_empty() { " " } else { line };
                            row(&format!("<FONT FACE=\"monospace\">{line}</FONT>"))
                        })
                        .collect();
                    nested_row(&format!(
                        "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"2\">{rows}</TABLE>"
                    ))
                }
                Block::BlockQuote => nested_row(&format!(
                    "<TABLE BORDER=\"0\" CELLBORDER=\"0\"><TR><TD WIDTH=\"20\"></TD><TD ALIGN=\"LEFT\">\
                     <TABLE BORDER=\"0\" CELLBORDER=\"0\">{text}</TABLE></TD></TR></TABLE>"
                )),
                Block::Table => nested_row(&format!(
                    "<TABLE BORDER=\"1\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">{text}</TABLE>"
                )),
                Block::TableHead => {
                    self.table.in_head = false;
                    format!("<TR>{text}</TR>")
                }
                Block::TableRow => format!("<TR>{text}</TR>"),
                Block::TableCell => {
                    let align = match self.table.alignments.get(self.table.column) {
                        Some(Alignment::Left) => " ALIGN=\"LEFT\"",
                        Some(Alignment::Center) => " ALIGN=\"CENTER\"",
                        Some(Alignment::Right) => " ALIGN=\"RIGHT\"",
                        _ => "",
                    };
                    self.table.column += 1;
                    if self.table.in_head {
                        format!("<TD{align}><B>{text}</B></TD>")
                    } else {
                        format!("<TD{align}>{text}</TD>")
                    }
                }
            };
            self.push_str(&rendered);
        }

        fn event(&mut self, event: Event) {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                    self.push_str(&escape_html(&text))
                }
                Event::Code(code) => {
                    if code.trim().is_empty() {
                        self.push_str(&escape_html(&code));
                    } else {
                        self.push_str(&format!(
                            "<FONT FACE=\"monospace\">{}</FONT>",
                            escape_html(&code)
                        ));
                    }
                }
                Event::SoftBreak => self.push_str(" "),
                Event::HardBreak => self.push_str("<BR/>"),
                Event::Rule => self.push_str(&row(RULE)),
                Event::TaskListMarker(checked) => {
                    self.push_str(if checked { "[x] " } else { "[ ] " })
                }
                _ => {}
            }
        }

        fn finish(mut self) -> String {
            while self.stack.len() > 1 {
                self.end(TagEnd::Paragraph);
            }
            self.stack.pop().map(|frame| frame.buf).unwrap_or_default()
        }
    }

    pub(super) fn to_table(text: &str) -> String {
        let options =
            Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
        let mut writer = LabelWriter::new();
        for event in Parser::new_ext(text, options) {
            writer.event(event);
        }
        let body = writer.finish();
        let body = body.trim();
        if body.is_empty() {
            String::new()
        } else {
            format!("<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\">{body}</TABLE>")
        }
    }
}
