//! Tab colors: hex strings <-> fractional RGB.
//!
//! The API describes colors as `{red, green, blue, alpha}` floats in
//! `0.0..=1.0`. Alpha is dropped in both directions.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Fractional RGB color as sent to and returned by the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
}

impl Rgb {
    pub fn new(red: f64, green: f64, blue: f64) -> Rgb {
        Rgb { red, green, blue }
    }
}

fn hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#?(?:([[:xdigit:]]{2})([[:xdigit:]]{2})([[:xdigit:]]{2})|([[:xdigit:]])([[:xdigit:]])([[:xdigit:]]))$")
            .expect("hex color regex must compile")
    })
}

/// Parse `#rrggbb` or `#rgb` (the `#` is optional). Returns `None` for
/// anything else.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let caps = hex_re().captures(hex.trim())?;
    let channel = |long: usize, short: usize| -> Option<f64> {
        let digits = match caps.get(long) {
            Some(m) => m.as_str().to_string(),
            None => caps.get(short)?.as_str().repeat(2),
        };
        let value = u8::from_str_radix(&digits, 16).ok()?;
        Some(f64::from(value) / 255.0)
    };
    Some(Rgb {
        red: channel(1, 4)?,
        green: channel(2, 5)?,
        blue: channel(3, 6)?,
    })
}

/// Format as lowercase `#rrggbb`, rounding each channel to 8 bits.
pub fn rgb_to_hex(color: &Rgb) -> String {
    let byte = |channel: f64| -> u8 { (channel.clamp(0.0, 1.0) * 255.0).round() as u8 };
    format!(
        "#{:02x}{:02x}{:02x}",
        byte(color.red),
        byte(color.green),
        byte(color.blue)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_to_rgb_long_form() {
        assert_eq!(hex_to_rgb("#ff0000"), Some(Rgb::new(1.0, 0.0, 0.0)));
        assert_eq!(hex_to_rgb("00FF00"), Some(Rgb::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_hex_to_rgb_short_form() {
        assert_eq!(hex_to_rgb("#00f"), Some(Rgb::new(0.0, 0.0, 1.0)));
        let gray = hex_to_rgb("#888").unwrap();
        assert_eq!(gray.red, f64::from(0x88u8) / 255.0);
    }

    #[test]
    fn test_hex_to_rgb_rejects_garbage() {
        for bad in ["", "#", "#ff00", "#ff00000", "#gg0000", "red", "#ff000080"] {
            assert_eq!(hex_to_rgb(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(&Rgb::new(0.0, 1.0, 0.0)), "#00ff00");
        assert_eq!(rgb_to_hex(&Rgb::new(0.5, 0.5, 0.5)), "#808080");
        assert_eq!(rgb_to_hex(&Rgb::new(2.0, -1.0, 0.0)), "#ff0000");
    }

    #[test]
    fn test_missing_channels_deserialize_as_zero() {
        let color: Rgb = serde_json::from_str(r#"{"green": 1, "alpha": 0.5}"#).unwrap();
        assert_eq!(rgb_to_hex(&color), "#00ff00");
    }

    proptest! {
        #[test]
        fn lowercase_hex_round_trips(x in "#[0-9a-f]{6}") {
            let rgb = hex_to_rgb(&x).unwrap();
            prop_assert_eq!(rgb_to_hex(&rgb), x);
        }
    }
}
