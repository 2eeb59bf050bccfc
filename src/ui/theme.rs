use ratatui::style::Color;

/// Phosphor-green CRT palette
pub const BG: Color = Color::Rgb(8, 12, 8);
pub const FG: Color = Color::Rgb(200, 210, 200);
pub const DIM: Color = Color::Rgb(70, 85, 70);
pub const GRID: Color = Color::Rgb(40, 55, 40);
pub const TRACE: Color = Color::Rgb(80, 255, 80);
pub const ACCENT: Color = Color::Rgb(0, 230, 120);
pub const WARN: Color = Color::Rgb(230, 200, 50);
pub const VU_GREEN: Color = Color::Rgb(50, 220, 80);
pub const VU_YELLOW: Color = Color::Rgb(220, 220, 50);
pub const VU_RED: Color = Color::Rgb(220, 50, 50);
pub const SELECTED_BG: Color = Color::Rgb(25, 40, 30);
