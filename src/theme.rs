use ratatui::style::{Color, Modifier, Style};

// Oceanic Next, the subset the cheat screen uses
pub const BORDER: Color = Color::Rgb(0x65, 0x73, 0x7E);
pub const TEXT: Color = Color::Rgb(0xC0, 0xC5, 0xCE);
pub const DIM: Color = Color::Rgb(0x4F, 0x5B, 0x66);
pub const MATCH: Color = Color::Rgb(0x99, 0xC7, 0x94);
pub const MISS: Color = Color::Rgb(0xEC, 0x5F, 0x67);
pub const ACCENT: Color = Color::Rgb(0xFA, 0xC8, 0x63);

pub fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn label_style(matched: bool) -> Style {
    if matched {
        Style::default().fg(MATCH).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MISS)
    }
}
