use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 96, g: 165, b: 250 };
pub const ACCENT: Color = Color::TrueColor { r: 250, g: 204, b: 21 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor { r: 134, g: 239, b: 172 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 196, g: 181, b: 253 };
pub const IPV4_PREFIX: Color = Color::Green;
pub const IPV6_PREFIX: Color = Color::Magenta;
pub const DIGEST: Color = Color::Cyan;
pub const PASS: Color = Color::Green;
pub const FAIL: Color = Color::Red;
