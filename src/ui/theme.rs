use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0xf5, 0xa6, 0x23);
pub const TITLE_TEXT: Color = Color::Rgb(0xf6, 0xf9, 0xfd);
pub const MUTED_TEXT: Color = Color::Rgb(0xaa, 0xb4, 0xc5);
pub const CARD_BORDER: Color = Color::Rgb(0x64, 0x70, 0x83);
pub const SELECTED_BG: Color = Color::Rgb(0x26, 0x26, 0x26);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
