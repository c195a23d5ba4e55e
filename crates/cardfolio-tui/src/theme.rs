use ratatui::style::Color;

/// Platinum-on-black palette of the wallet
pub struct PlatinumNoir;

impl PlatinumNoir {
    pub const BG0: Color = Color::Rgb(0x0a, 0x0a, 0x0a);
    pub const BG1: Color = Color::Rgb(0x1a, 0x1a, 0x1a);
    pub const BG2: Color = Color::Rgb(0x2b, 0x2b, 0x2b);
    pub const FG0: Color = Color::Rgb(0xec, 0xf0, 0xf1);
    pub const GREY0: Color = Color::Rgb(0x64, 0x74, 0x8b);
    pub const GREY1: Color = Color::Rgb(0x94, 0xa3, 0xb8);
    pub const ACCENT: Color = Color::Rgb(0x4f, 0xac, 0xfe);
    pub const GOLD: Color = Color::Rgb(0xd4, 0xaf, 0x37);
}

/// Blend `color` toward `background` as `opacity` goes from 1 to 0
///
/// Non-RGB colors are returned unchanged.
pub fn fade(color: Color, background: Color, opacity: f64) -> Color {
    let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => Color::Rgb(
            mix(br, r, opacity),
            mix(bg, g, opacity),
            mix(bb, b, opacity),
        ),
        _ => color,
    }
}

fn mix(from: u8, to: u8, t: f64) -> u8 {
    let value = from as f64 + (to as f64 - from as f64) * t;
    value.round().clamp(0.0, 255.0) as u8
}
