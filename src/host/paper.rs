// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Paper formats and orientation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// ISO 216 A series, width x height in mm, index 0..=10
const A_SERIES: [(f64, f64); 11] = [
    (841.0, 1189.0),
    (594.0, 841.0),
    (420.0, 594.0),
    (297.0, 420.0),
    (210.0, 297.0),
    (148.0, 210.0),
    (105.0, 148.0),
    (74.0, 105.0),
    (52.0, 74.0),
    (37.0, 52.0),
    (26.0, 37.0),
];

const B_SERIES: [(f64, f64); 11] = [
    (1000.0, 1414.0),
    (707.0, 1000.0),
    (500.0, 707.0),
    (353.0, 500.0),
    (250.0, 353.0),
    (176.0, 250.0),
    (125.0, 176.0),
    (88.0, 125.0),
    (62.0, 88.0),
    (44.0, 62.0),
    (31.0, 44.0),
];

const C_SERIES: [(f64, f64); 11] = [
    (917.0, 1297.0),
    (648.0, 917.0),
    (458.0, 648.0),
    (324.0, 458.0),
    (229.0, 324.0),
    (162.0, 229.0),
    (114.0, 162.0),
    (81.0, 114.0),
    (57.0, 81.0),
    (40.0, 57.0),
    (28.0, 40.0),
];

/// Paper format accepted by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperSize {
    /// ISO A0..A10
    A(u8),
    /// ISO B0..B10
    B(u8),
    /// ISO C0..C10
    C(u8),
    /// DL envelope
    Dl,
    Letter,
    GovernmentLetter,
    Legal,
    JuniorLegal,
    Ledger,
    Tabloid,
    CreditCard,
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::A(4)
    }
}

impl PaperSize {
    /// Parse a format name (case-insensitive); `None` for unknown names
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let named = match name.as_str() {
            "dl" => Some(PaperSize::Dl),
            "letter" => Some(PaperSize::Letter),
            "government-letter" => Some(PaperSize::GovernmentLetter),
            "legal" => Some(PaperSize::Legal),
            "junior-legal" => Some(PaperSize::JuniorLegal),
            "ledger" => Some(PaperSize::Ledger),
            "tabloid" => Some(PaperSize::Tabloid),
            "credit-card" => Some(PaperSize::CreditCard),
            _ => None,
        };
        if named.is_some() {
            return named;
        }

        let mut chars = name.chars();
        let series = chars.next()?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        // "a01" is not a format name
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        let index: u8 = digits.parse().ok().filter(|i| *i <= 10)?;
        match series {
            'a' => Some(PaperSize::A(index)),
            'b' => Some(PaperSize::B(index)),
            'c' => Some(PaperSize::C(index)),
            _ => None,
        }
    }

    /// Parse, falling back to A4
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    /// Portrait width and height in millimetres
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match *self {
            PaperSize::A(i) => A_SERIES[usize::from(i.min(10))],
            PaperSize::B(i) => B_SERIES[usize::from(i.min(10))],
            PaperSize::C(i) => C_SERIES[usize::from(i.min(10))],
            PaperSize::Dl => (110.0, 220.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::GovernmentLetter => (203.2, 266.7),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::JuniorLegal => (127.0, 203.2),
            PaperSize::Ledger => (431.8, 279.4),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::CreditCard => (53.98, 85.73),
        }
    }

    /// Width and height in millimetres for an orientation
    pub fn page_size_mm(&self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::A(i) => write!(f, "a{}", i),
            PaperSize::B(i) => write!(f, "b{}", i),
            PaperSize::C(i) => write!(f, "c{}", i),
            PaperSize::Dl => f.write_str("dl"),
            PaperSize::Letter => f.write_str("letter"),
            PaperSize::GovernmentLetter => f.write_str("government-letter"),
            PaperSize::Legal => f.write_str("legal"),
            PaperSize::JuniorLegal => f.write_str("junior-legal"),
            PaperSize::Ledger => f.write_str("ledger"),
            PaperSize::Tabloid => f.write_str("tabloid"),
            PaperSize::CreditCard => f.write_str("credit-card"),
        }
    }
}

impl FromStr for PaperSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::Config(format!("unknown paper size '{}'", s)))
    }
}

impl Serialize for PaperSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PaperSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Parse (case-insensitive); `None` for anything but portrait/landscape
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }

    /// Parse, falling back to portrait
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_sizes() {
        assert_eq!(PaperSize::parse("A4"), Some(PaperSize::A(4)));
        assert_eq!(PaperSize::parse("b10"), Some(PaperSize::B(10)));
        assert_eq!(PaperSize::parse("c0"), Some(PaperSize::C(0)));
        assert_eq!(PaperSize::parse("Government-Letter"), Some(PaperSize::GovernmentLetter));
        assert_eq!(PaperSize::parse("credit-card"), Some(PaperSize::CreditCard));
    }

    #[test]
    fn test_unknown_sizes_fall_back_to_a4() {
        for name in ["a11", "d4", "a", "a-4", "a04", "", "letterx", "🙂"] {
            assert_eq!(PaperSize::parse(name), None, "{}", name);
            assert_eq!(PaperSize::parse_or_default(name), PaperSize::A(4));
        }
    }

    #[test]
    fn test_display_round_trips_names() {
        for name in ["a0", "b7", "c10", "dl", "junior-legal", "ledger", "tabloid"] {
            assert_eq!(PaperSize::parse(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_dimensions_follow_orientation() {
        let a4 = PaperSize::A(4);
        assert_eq!(a4.page_size_mm(Orientation::Portrait), (210.0, 297.0));
        assert_eq!(a4.page_size_mm(Orientation::Landscape), (297.0, 210.0));
        assert_eq!(
            PaperSize::Ledger.page_size_mm(Orientation::Portrait),
            (279.4, 431.8)
        );
    }

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::parse("LANDSCAPE"), Some(Orientation::Landscape));
        assert_eq!(Orientation::parse_or_default("sideways"), Orientation::Portrait);
        assert_eq!(
            serde_json::to_string(&Orientation::Landscape).unwrap(),
            "\"landscape\""
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&PaperSize::GovernmentLetter).unwrap();
        assert_eq!(json, "\"government-letter\"");
        let size: PaperSize = serde_json::from_str("\"A3\"").unwrap();
        assert_eq!(size, PaperSize::A(3));
        assert!(serde_json::from_str::<PaperSize>("\"z9\"").is_err());
    }
}
