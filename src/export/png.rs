// src/export/png.rs

use crate::errors::{AppError, AppResult};
use crate::export::glyphs::{ADVANCE, GLYPH_H, GLYPH_W, glyph, text_width};
use crate::export::model::{CORNER_LABEL, Card, EMPTY_CELL, GridView};
use crate::models::Color;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use std::path::Path;

// Layout in logical pixels; everything is multiplied by the pixel ratio.
const MARGIN: u32 = 24;
const TITLE_H: u32 = 40;
const LABEL_W: u32 = 160;
const LINE_H: u32 = 20;
const PAD: u32 = 8;
const MIN_ROW_H: u32 = 60;
/// Logical pixels per glyph pixel.
const TEXT_SCALE: u32 = 2;

const TEXT: Color = Color::hex(0x1F2937);
const MUTED: Color = Color::hex(0xD1D5DB);
const BORDER: Color = Color::hex(0x9CA3AF);
const HEADER_FILL: Color = Color::hex(0xE5E7EB);
const LABEL_FILL: Color = Color::hex(0xF9FAFB);

#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    /// Logical width of the snapshot.
    pub width: u32,
    pub pixel_ratio: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            pixel_ratio: 2,
        }
    }
}

struct Canvas {
    img: RgbImage,
    ratio: u32,
}

impl Canvas {
    fn new(width: u32, height: u32, ratio: u32) -> Self {
        let img = RgbImage::from_pixel(width * ratio, height * ratio, rgb(Color::WHITE));
        Self { img, ratio }
    }

    fn rect(&self, x: u32, y: u32, w: u32, h: u32) -> Option<Rect> {
        let (w, h) = (w * self.ratio, h * self.ratio);
        if w == 0 || h == 0 {
            return None;
        }
        Some(Rect::at((x * self.ratio) as i32, (y * self.ratio) as i32).of_size(w, h))
    }

    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        if let Some(r) = self.rect(x, y, w, h) {
            draw_filled_rect_mut(&mut self.img, r, rgb(color));
        }
    }

    fn stroke(&mut self, x: u32, y: u32, w: u32, h: u32) {
        if let Some(r) = self.rect(x, y, w, h) {
            draw_hollow_rect_mut(&mut self.img, r, rgb(BORDER));
        }
    }

    /// Draw one line of text with its top-left corner at (x, y).
    fn text(&mut self, x: u32, y: u32, s: &str, color: Color) {
        let px = TEXT_SCALE * self.ratio;
        let mut cx = x * self.ratio;
        let top = y * self.ratio;

        for ch in s.chars() {
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        let r = Rect::at((cx + col * px) as i32, (top + row as u32 * px) as i32)
                            .of_size(px, px);
                        draw_filled_rect_mut(&mut self.img, r, rgb(color));
                    }
                }
            }
            cx += ADVANCE * px;
        }
    }

    /// Text horizontally centered in the span [x, x + w).
    fn text_centered(&mut self, x: u32, w: u32, y: u32, s: &str, color: Color) {
        let tw = text_width(s) * TEXT_SCALE;
        let left = x + w.saturating_sub(tw) / 2;
        self.text(left, y, s, color);
    }
}

fn rgb(c: Color) -> Rgb<u8> {
    Rgb([c.r, c.g, c.b])
}

fn chars_per_line(width: u32) -> usize {
    (width.saturating_sub(2 * PAD) / (ADVANCE * TEXT_SCALE)).max(1) as usize
}

fn wrap_card(card: &Card, width: u32) -> Vec<String> {
    let cols = chars_per_line(width);
    card.lines
        .iter()
        .flat_map(|l| textwrap::wrap(l, cols).into_iter().map(|c| c.into_owned()))
        .collect()
}

fn card_height(lines: usize) -> u32 {
    lines as u32 * LINE_H + 2 * PAD
}

/// Vertical offset that centers a glyph line inside a LINE_H band.
const TEXT_INSET: u32 = (LINE_H - GLYPH_H * TEXT_SCALE) / 2;

/// Rasterize the timetable on a white background.
pub(crate) fn render(view: &GridView, opts: RasterOptions) -> AppResult<RgbImage> {
    if view.is_empty() {
        return Err(AppError::Export(
            "zero-size render target: the timetable has no dates or time slots".into(),
        ));
    }

    let ncols = view.columns.len() as u32;
    let width = opts.width.max(2 * MARGIN + LABEL_W + ncols);
    let date_w = (width - 2 * MARGIN - LABEL_W) / ncols;
    let header_h = 2 * LINE_H + 2 * PAD;

    let wrapped: Vec<Vec<Vec<Vec<String>>>> = view
        .rows
        .iter()
        .map(|r| {
            r.cells
                .iter()
                .map(|cards| cards.iter().map(|c| wrap_card(c, date_w)).collect())
                .collect()
        })
        .collect();

    let row_heights: Vec<u32> = wrapped
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|cards| cards.iter().map(|l| card_height(l.len())).sum::<u32>())
                .fold(MIN_ROW_H, u32::max)
        })
        .collect();

    let height = MARGIN + TITLE_H + header_h + row_heights.iter().sum::<u32>() + MARGIN;
    let ratio = opts.pixel_ratio.max(1);
    let mut canvas = Canvas::new(width, height, ratio);

    canvas.text(MARGIN, MARGIN + TEXT_INSET, &view.title, TEXT);

    // header
    let mut y = MARGIN + TITLE_H;
    canvas.fill(MARGIN, y, LABEL_W + date_w * ncols, header_h, HEADER_FILL);
    canvas.stroke(MARGIN, y, LABEL_W, header_h);
    canvas.text_centered(MARGIN, LABEL_W, y + PAD + LINE_H / 2 + TEXT_INSET, CORNER_LABEL, TEXT);

    let mut x = MARGIN + LABEL_W;
    for (date, weekday) in &view.columns {
        canvas.stroke(x, y, date_w, header_h);
        canvas.text_centered(x, date_w, y + PAD + TEXT_INSET, date, TEXT);
        canvas.text_centered(x, date_w, y + PAD + LINE_H + TEXT_INSET, weekday, TEXT);
        x += date_w;
    }
    y += header_h;

    for ((row, cells), row_h) in view.rows.iter().zip(&wrapped).zip(&row_heights) {
        let row_h = *row_h;
        canvas.fill(MARGIN, y, LABEL_W, row_h, LABEL_FILL);
        canvas.stroke(MARGIN, y, LABEL_W, row_h);
        let text_y = y + (row_h - LINE_H) / 2 + TEXT_INSET;
        canvas.text_centered(MARGIN, LABEL_W, text_y, &row.label, TEXT);

        let mut x = MARGIN + LABEL_W;
        for (cards, lines) in row.cells.iter().zip(cells) {
            if cards.is_empty() {
                canvas.text_centered(x, date_w, text_y, EMPTY_CELL, MUTED);
            }

            let mut top = y;
            for (card, card_lines) in cards.iter().zip(lines) {
                // a lone card fills its cell
                let h = if cards.len() == 1 {
                    row_h
                } else {
                    card_height(card_lines.len())
                };
                canvas.fill(x, top, date_w, h, card.color);

                let block = card_lines.len() as u32 * LINE_H;
                let mut ty = top + (h - block) / 2;
                for line in card_lines {
                    canvas.text_centered(x, date_w, ty + TEXT_INSET, line, TEXT);
                    ty += LINE_H;
                }
                top += h;
            }

            canvas.stroke(x, y, date_w, row_h);
            x += date_w;
        }
        y += row_h;
    }

    Ok(canvas.img)
}

pub(crate) fn export_png(view: &GridView, opts: RasterOptions, path: &Path) -> AppResult<()> {
    let img = render(view, opts)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| AppError::Export(format!("PNG encode error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::model::GridRow;

    fn view(columns: usize, rows: usize) -> GridView {
        GridView {
            title: "Exam Schedule".into(),
            columns: (0..columns)
                .map(|i| (format!("Jan {}", 10 + i), "Wed".to_string()))
                .collect(),
            rows: (0..rows)
                .map(|_| GridRow {
                    label: "9:00 am - 11:00 am".into(),
                    cells: (0..columns)
                        .map(|c| {
                            if c == 0 {
                                vec![Card {
                                    lines: vec!["Physics".into()],
                                    color: Color::hex(0xE3F2FD),
                                }]
                            } else {
                                vec![]
                            }
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn snapshot_is_double_density_fixed_width() {
        let img = render(&view(2, 1), RasterOptions::default()).unwrap();
        assert_eq!(img.width(), 2400);
        let expected_h = (MARGIN + TITLE_H + 2 * LINE_H + 2 * PAD + MIN_ROW_H + MARGIN) * 2;
        assert_eq!(img.height(), expected_h);
        // white background in the corner
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn exam_cards_are_painted_in_their_color() {
        let img = render(&view(2, 1), RasterOptions::default()).unwrap();
        let y = (MARGIN + TITLE_H + 2 * LINE_H + 2 * PAD + 2) * 2;
        let x = (MARGIN + LABEL_W + 2) * 2;
        assert_eq!(img.get_pixel(x, y), &Rgb([0xE3, 0xF2, 0xFD]));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let err = render(&view(0, 0), RasterOptions::default()).unwrap_err();
        assert!(err.to_string().contains("zero-size"));
        let err = render(&view(3, 0), RasterOptions::default()).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn ratio_one_halves_the_bitmap() {
        let img = render(&view(1, 2), RasterOptions { width: 1200, pixel_ratio: 1 }).unwrap();
        assert_eq!(img.width(), 1200);
    }
}
