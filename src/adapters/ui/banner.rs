//! Welcome banner with a vertical color gradient (JOURNAL).
//! Uses figlet's built-in standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Dusk violet (#7b2ff7).
const DUSK_VIOLET: (u8, u8, u8) = (0x7b, 0x2f, 0xf7);
/// Sunrise amber (#f7b32b).
const SUNRISE_AMBER: (u8, u8, u8) = (0xf7, 0xb3, 0x2b);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// ASCII art for `text`, or the plain text when figlet cannot render it.
fn render(text: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|figure| figure.to_string()))
        .unwrap_or_else(|| text.to_string())
}

/// Prints "JOURNAL" in figlet ASCII with a violet-to-amber gradient, then the version.
pub fn print_welcome() {
    let mut out = stdout();
    let art = render("JOURNAL");
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(DUSK_VIOLET, SUNRISE_AMBER, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SUNRISE_AMBER.0,
        g: SUNRISE_AMBER.1,
        b: SUNRISE_AMBER.2,
    }));
    let _ = out.execute(Print(format!("journal-insights v{}\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(DUSK_VIOLET, SUNRISE_AMBER, 0.0), DUSK_VIOLET);
        assert_eq!(lerp_rgb(DUSK_VIOLET, SUNRISE_AMBER, 1.0), SUNRISE_AMBER);
    }

    #[test]
    fn test_render_is_multiline() {
        assert!(render("JOURNAL").lines().count() > 1);
    }
}
