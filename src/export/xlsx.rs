// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{EMPTY_CELL, ExamExport, GridView};
use crate::models::Color as ExamColor;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Timetable sheet plus a flat "Subjects" sheet, with exam colors as fills.
pub(crate) fn export_xlsx(view: &GridView, exams: &[ExamExport], path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();

    write_grid(workbook.add_worksheet(), view)?;
    write_subjects(workbook.add_worksheet(), exams)?;

    workbook.save(path).map_err(to_export_error)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x1F2937))
        .set_background_color(Color::RGB(0xE5E7EB))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn write_grid(ws: &mut Worksheet, view: &GridView) -> AppResult<()> {
    ws.set_name("Timetable").map_err(to_export_error)?;

    let head = header_format();
    let headers = view.header_labels();
    let mut col_widths: Vec<usize> = headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, h.as_str(), &head)
            .map_err(to_export_error)?;
    }
    ws.set_freeze_panes(1, 1).ok();

    let label_fmt = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF9FAFB))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let empty_fmt = Format::new()
        .set_font_color(Color::RGB(0xD1D5DB))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    for (r, row) in view.rows.iter().enumerate() {
        let xr = (r + 1) as u32;
        ws.write_with_format(xr, 0, row.label.as_str(), &label_fmt)
            .map_err(to_export_error)?;
        col_widths[0] = col_widths[0].max(UnicodeWidthStr::width(row.label.as_str()));

        let mut max_lines = 1;
        for (c, cards) in row.cells.iter().enumerate() {
            let xc = (c + 1) as u16;

            let Some(first) = cards.first() else {
                ws.write_with_format(xr, xc, EMPTY_CELL, &empty_fmt)
                    .map_err(to_export_error)?;
                continue;
            };

            // One cell per slot: stacked exams are separated by a blank line
            // and the cell takes the first exam's color.
            let text = cards
                .iter()
                .map(|k| k.lines.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n");
            max_lines = max_lines.max(text.lines().count());
            for l in text.lines() {
                col_widths[c + 1] = col_widths[c + 1].max(UnicodeWidthStr::width(l));
            }

            ws.write_with_format(xr, xc, text.as_str(), &card_format(first.color))
                .map_err(to_export_error)?;
        }

        ws.set_row_height(xr, 15.0 * max_lines as f64 + 6.0)
            .map_err(to_export_error)?;
    }

    for (c, w) in col_widths.iter().enumerate() {
        ws.set_column_width(c as u16, (*w).min(40) as f64 + 2.0)
            .map_err(to_export_error)?;
    }
    Ok(())
}

fn card_format(color: ExamColor) -> Format {
    Format::new()
        .set_bold()
        .set_text_wrap()
        .set_background_color(Color::RGB(color.rgb()))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn write_subjects(ws: &mut Worksheet, exams: &[ExamExport]) -> AppResult<()> {
    ws.set_name("Subjects").map_err(to_export_error)?;

    let headers = [
        "id", "course_code", "course_name", "date", "day", "slot", "start", "end", "classroom",
        "course_type",
    ];
    let head = header_format();
    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &head)
            .map_err(to_export_error)?;
    }

    for (i, e) in exams.iter().enumerate() {
        let row = (i + 1) as u32;
        let color = e.color.parse::<ExamColor>().unwrap_or(ExamColor::WHITE);
        let fmt = Format::new()
            .set_background_color(Color::RGB(color.rgb()))
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        let values = [
            e.id.to_string(),
            e.course_code.clone(),
            e.course_name.clone(),
            e.date.clone(),
            e.day.map(|d| d.to_string()).unwrap_or_default(),
            e.slot.clone(),
            e.start.clone(),
            e.end.clone(),
            e.classroom.clone(),
            e.course_type.clone(),
        ];

        for (col, v) in values.iter().enumerate() {
            ws.write_with_format(row, col as u16, v.as_str(), &fmt)
                .map_err(to_export_error)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(v.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        ws.set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
