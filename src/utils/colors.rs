//! ANSI color helper utilities for terminal output.
use crate::models::Color;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const DARK_TEXT: &str = "\x1b[38;2;31;41;55m";

/// 24-bit background escape for an exam color.
pub fn bg(color: Color) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Paint `text` on the exam color with dark foreground, as the cards are drawn.
pub fn paint(text: &str, color: Color) -> String {
    format!("{}{DARK_TEXT}{text}{RESET}", bg(color))
}
