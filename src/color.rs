pub const DEFAULT_COLOR: &str = "#ffffff";
pub const DEFAULT_OPACITY: u8 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Parses `#rgb` or `#rrggbb`, the leading `#` being optional.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| {
                    let v = c.to_digit(16).unwrap_or(0) as u8;
                    v * 17
                });
                Some(Rgb {
                    r: channels.next()?,
                    g: channels.next()?,
                    b: channels.next()?,
                })
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Rgb {
                    r: channel(0)?,
                    g: channel(2)?,
                    b: channel(4)?,
                })
            }
            _ => None,
        }
    }
}

/// Accepts only whole percentages in [0, 100]; anything else yields the default.
pub fn validate_opacity(opacity: Option<f64>) -> u8 {
    match opacity {
        Some(o) if o.fract() == 0.0 && (0.0..=100.0).contains(&o) => o as u8,
        _ => DEFAULT_OPACITY,
    }
}

pub fn alpha(opacity: u8) -> f64 {
    opacity as f64 / 100.0
}

pub fn to_rgba(color: Rgb, opacity: u8) -> String {
    format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, alpha(opacity))
}

/// Builds the overlay background from the raw options. Unparseable colors
/// fall back to white.
pub fn background(color: Option<&str>, opacity: Option<f64>) -> String {
    let hex = color.unwrap_or(DEFAULT_COLOR);
    let rgb = Rgb::from_hex(hex).unwrap_or_else(|| {
        log::warn!("lightzoom: `{}` is not a hex color, using {}", hex, DEFAULT_COLOR);
        Rgb::WHITE
    });
    to_rgba(rgb, validate_opacity(opacity))
}
