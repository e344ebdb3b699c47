use crate::export::model::{CORNER_LABEL, Card, EMPTY_CELL, GridView};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    line_h: f32,
    label_w: f32,

    next_id: i32,
    font_id: Ref,
    bold_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    /// A4 landscape.
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 842.0,
            page_h: 595.0,
            margin: 36.0,
            line_h: 11.0,
            label_w: 96.0,

            next_id,
            font_id,
            bold_id,

            font_size: 8.0,
            header_font_size: 9.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font = if bold { Name(b"F2") } else { Name(b"F1") };
        let bytes = latin1(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn fill_rect(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        rgb: (f32, f32, f32),
    ) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    /// Fit `text` into `width` points, cutting with "..." when needed.
    fn fit(&self, text: &str, width: f32, size: f32) -> String {
        let max_chars = ((width - 6.0) / (size * 0.52)).max(3.0) as usize;
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }

    fn column_widths(&self, columns: usize) -> (f32, f32) {
        let usable = self.page_w - 2.0 * self.margin;
        let date_w = ((usable - self.label_w) / columns.max(1) as f32).max(1.0);
        (self.label_w, date_w)
    }

    fn row_height(&self, cells: &[Vec<Card>]) -> f32 {
        let lines = cells
            .iter()
            .map(|cards| cards.iter().map(|c| c.lines.len() as f32 + 0.6).sum::<f32>())
            .fold(1.0_f32, f32::max);
        (lines * self.line_h + 8.0).max(32.0)
    }

    fn draw_header(&self, content: &mut Content, view: &GridView, y: f32, date_w: f32) -> f32 {
        let h = 2.0 * self.line_h + 10.0;
        let y0 = y - h;
        let total_w = self.label_w + date_w * view.columns.len() as f32;

        self.fill_rect(content, self.margin, y0, total_w, h, (0.90, 0.91, 0.92));
        self.draw_cell_borders(content, self.margin, y0, self.label_w, h);
        self.draw_text(
            content,
            self.margin + 4.0,
            y0 + h / 2.0 - 3.0,
            self.header_font_size,
            true,
            CORNER_LABEL,
        );

        let mut x = self.margin + self.label_w;
        for (date, weekday) in &view.columns {
            self.draw_cell_borders(content, x, y0, date_w, h);
            self.draw_text(
                content,
                x + 4.0,
                y0 + h - self.line_h - 2.0,
                self.header_font_size,
                true,
                &self.fit(date, date_w, self.header_font_size),
            );
            self.draw_text(content, x + 4.0, y0 + 6.0, self.font_size, false, weekday);
            x += date_w;
        }
        y0
    }

    /// Draw the timetable, paginating rows. A view with no rows still gets
    /// one page with the header.
    pub fn write_grid(&mut self, view: &GridView) {
        let (label_w, date_w) = self.column_widths(view.columns.len());
        let mut remaining = view.rows.as_slice();
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, &view.title, page_idx);

            let mut y = self.page_h - self.margin - 24.0;
            y = self.draw_header(&mut content, view, y, date_w);

            let mut consumed = 0;
            for row in remaining {
                let h = self.row_height(&row.cells);
                if y - h < self.margin && consumed > 0 {
                    break;
                }
                let y0 = y - h;

                self.fill_rect(&mut content, self.margin, y0, label_w, h, (0.98, 0.98, 0.98));
                self.draw_cell_borders(&mut content, self.margin, y0, label_w, h);
                self.draw_text(
                    &mut content,
                    self.margin + 4.0,
                    y0 + h / 2.0 - 3.0,
                    self.font_size,
                    true,
                    &self.fit(&row.label, label_w, self.font_size),
                );

                let mut x = self.margin + label_w;
                for cards in &row.cells {
                    self.draw_cards(&mut content, cards, x, y0, date_w, h);
                    self.draw_cell_borders(&mut content, x, y0, date_w, h);
                    x += date_w;
                }

                y = y0;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    fn draw_cards(&self, content: &mut Content, cards: &[Card], x: f32, y0: f32, w: f32, h: f32) {
        if cards.is_empty() {
            content.save_state();
            content.set_fill_rgb(0.82, 0.84, 0.86);
            self.draw_text(
                content,
                x + w / 2.0 - 2.0,
                y0 + h / 2.0 - 3.0,
                self.font_size,
                false,
                EMPTY_CELL,
            );
            content.restore_state();
            return;
        }

        let share = h / cards.len() as f32;
        let mut top = y0 + h;
        for card in cards {
            let bottom = top - share;
            self.fill_rect(content, x, bottom, w, share, card.color.unit_rgb());

            let mut ty = top - self.line_h;
            for (i, line) in card.lines.iter().enumerate() {
                if ty < bottom + 2.0 {
                    break;
                }
                let text = self.fit(line, w, self.font_size);
                self.draw_text(content, x + 4.0, ty, self.font_size, i == 0, &text);
                ty -= self.line_h;
            }
            top = bottom;
        }
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin,
            self.title_font_size,
            true,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 40.0,
            self.margin - 20.0,
            self.font_size,
            false,
            &pg,
        );
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Standard Type1 fonts are single-byte; characters outside Latin-1 print as '?'.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '•' => b'-',
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::model::GridRow;
    use crate::models::Color;

    fn view(rows: usize) -> GridView {
        GridView {
            title: "Exam Schedule: Alice (R1)".into(),
            columns: vec![("Jan 10".into(), "Wed".into()), ("Jan 11".into(), "Thu".into())],
            rows: (0..rows)
                .map(|i| GridRow {
                    label: format!("{}:00 am - {}:00 am", i % 12 + 1, i % 12 + 2),
                    cells: vec![
                        vec![Card {
                            lines: vec!["Physics".into(), "Room: LH-1".into()],
                            color: Color::hex(0xE3F2FD),
                        }],
                        vec![],
                    ],
                })
                .collect(),
        }
    }

    #[test]
    fn long_grids_paginate() {
        let mut pdf = PdfManager::new();
        pdf.write_grid(&view(40));
        assert!(pdf.page_refs.len() > 1);
    }

    #[test]
    fn small_grid_fits_one_page() {
        let mut pdf = PdfManager::new();
        pdf.write_grid(&view(3));
        assert_eq!(pdf.page_refs.len(), 1);
    }

    #[test]
    fn fit_truncates_long_text() {
        let pdf = PdfManager::new();
        let out = pdf.fit("Introduction to Quantum Field Theory", 60.0, 8.0);
        assert!(out.ends_with("..."));
        assert!(out.chars().count() < 20);
        assert_eq!(pdf.fit("Maths", 60.0, 8.0), "Maths");
    }

    #[test]
    fn latin1_replaces_wide_chars() {
        assert_eq!(latin1("é•✓"), vec![0xE9, b'-', b'?']);
    }
}
