use crate::errors::AppError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Display color of an exam row, stored as RGB and written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pastel palette cycled over a student's exam rows.
pub const PALETTE: [Color; 10] = [
    Color::hex(0xE3F2FD),
    Color::hex(0xE8F5E9),
    Color::hex(0xF3E5F5),
    Color::hex(0xFFF9C4),
    Color::hex(0xFFECB3),
    Color::hex(0xFFCDD2),
    Color::hex(0xF0F4C3),
    Color::hex(0xFFF3E0),
    Color::hex(0xE0E0E0),
    Color::hex(0xFFEBEE),
];

impl Color {
    pub const WHITE: Color = Color::hex(0xFFFFFF);

    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Palette color for the row at `index`.
    pub fn for_index(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }

    pub fn rgb(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Components in 0.0..=1.0, as PDF fill operators expect.
    pub fn unit_rgb(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Accepts `#RRGGBB`, `RRGGBB` or a 1-based palette index (`1`..=`10`).
impl FromStr for Color {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(n) = s.parse::<usize>()
            && (1..=PALETTE.len()).contains(&n)
        {
            return Ok(PALETTE[n - 1]);
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::InvalidColor(s.to_string()));
        }

        u32::from_str_radix(hex, 16)
            .map(Color::hex)
            .map_err(|_| AppError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(Color::for_index(0), PALETTE[0]);
        assert_eq!(Color::for_index(9), PALETTE[9]);
        assert_eq!(Color::for_index(10), PALETTE[0]);
        assert_eq!(Color::for_index(23), PALETTE[3]);
    }

    #[test]
    fn parses_hex_and_palette_index() {
        assert_eq!("#E3F2FD".parse::<Color>().unwrap(), PALETTE[0]);
        assert_eq!("ffebee".parse::<Color>().unwrap(), PALETTE[9]);
        assert_eq!("3".parse::<Color>().unwrap(), PALETTE[2]);
    }

    #[test]
    fn rejects_garbage() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("0".parse::<Color>().is_err());
        assert!("11".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
    }

    #[test]
    fn displays_uppercase_hex() {
        assert_eq!(Color::hex(0x0a0b0c).to_string(), "#0A0B0C");
    }
}
