//! Table rendering utilities for CLI outputs.
//!
//! Cells hold one or more colored blocks (stacked exams share a cell), each
//! block wrapped to the column width.

use crate::models::Color;
use crate::utils::colors::{DARK_TEXT, GREY, RESET, bg};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub lines: Vec<String>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub blocks: Vec<Block>,
    pub muted: bool,
}

impl Cell {
    pub fn text<S: Into<String>>(s: S) -> Self {
        Self::lines(vec![s.into()])
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            blocks: vec![Block { lines, color: None }],
            muted: false,
        }
    }

    /// Placeholder shown in grey.
    pub fn placeholder(s: &str) -> Self {
        Self {
            muted: true,
            ..Self::text(s)
        }
    }

    pub fn push_block(&mut self, lines: Vec<String>, color: Color) {
        self.blocks.push(Block {
            lines,
            color: Some(color),
        });
    }
}

type Line = (String, Option<Color>);

pub struct Table {
    headers: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    max_col_width: usize,
    ansi: bool,
}

impl Table {
    pub fn new(headers: Vec<Cell>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            max_col_width: 24,
            ansi: false,
        }
    }

    pub fn with_max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = width.max(4);
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let cols = self.headers.len();

        let mut natural = vec![1usize; cols];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate().take(cols) {
                let w = cell
                    .blocks
                    .iter()
                    .flat_map(|b| b.lines.iter())
                    .map(|l| UnicodeWidthStr::width(l.as_str()))
                    .max()
                    .unwrap_or(0);
                natural[i] = natural[i].max(w.min(self.max_col_width));
            }
        }

        let header = self.layout_row(&self.headers, &natural);
        let body: Vec<Vec<Vec<Line>>> = self
            .rows
            .iter()
            .map(|r| self.layout_row(r, &natural))
            .collect();

        // Wrapping may still overflow on unbreakable text; measure the result.
        let mut widths = natural;
        for row in std::iter::once(&header).chain(body.iter()) {
            for (i, cell) in row.iter().enumerate() {
                for (l, _) in cell {
                    widths[i] = widths[i].max(UnicodeWidthStr::width(l.as_str()));
                }
            }
        }

        let sep = separator(&widths);
        let mut out = String::new();
        out.push_str(&sep);
        self.render_row(&mut out, &header, &widths, &vec![false; cols]);
        out.push_str(&sep);
        for (r, row) in body.iter().enumerate() {
            let muted: Vec<bool> = (0..cols)
                .map(|i| self.rows[r].get(i).is_some_and(|c| c.muted))
                .collect();
            self.render_row(&mut out, row, &widths, &muted);
            out.push_str(&sep);
        }
        out
    }

    fn layout_row(&self, row: &[Cell], widths: &[usize]) -> Vec<Vec<Line>> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| match row.get(i) {
                Some(cell) => layout_cell(cell, w),
                None => Vec::new(),
            })
            .collect()
    }

    fn render_row(&self, out: &mut String, row: &[Vec<Line>], widths: &[usize], muted: &[bool]) {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for li in 0..height {
            out.push('|');
            for (i, w) in widths.iter().enumerate() {
                let (text, color) = row
                    .get(i)
                    .and_then(|c| c.get(li))
                    .map(|(t, c)| (t.as_str(), *c))
                    .unwrap_or(("", None));

                let pad = w.saturating_sub(UnicodeWidthStr::width(text));
                let padded = format!(" {text}{} ", " ".repeat(pad));

                match (self.ansi, color) {
                    (true, Some(c)) => {
                        out.push_str(&format!("{}{DARK_TEXT}{padded}{RESET}", bg(c)))
                    }
                    (true, None) if muted[i] => out.push_str(&format!("{GREY}{padded}{RESET}")),
                    _ => out.push_str(&padded),
                }
                out.push('|');
            }
            out.push('\n');
        }
    }
}

fn layout_cell(cell: &Cell, width: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    for block in &cell.blocks {
        for line in &block.lines {
            if line.is_empty() {
                lines.push((String::new(), block.color));
                continue;
            }
            for wrapped in textwrap::wrap(line, width) {
                lines.push((wrapped.into_owned(), block.color));
            }
        }
    }
    lines
}

fn separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}
