use plotters::style::{RGBAColor, RGBColor};

/// Series colours, cycled in order.
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(0x3B, 0x82, 0xF6),
    RGBColor(0x10, 0xB9, 0x81),
    RGBColor(0xF5, 0x9E, 0x0B),
    RGBColor(0xEF, 0x44, 0x44),
    RGBColor(0x8B, 0x5C, 0xF6),
    RGBColor(0x06, 0xB6, 0xD4),
];

pub fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBColor(255, 255, 255),
            text_color: RGBAColor(17, 24, 39, 1.0),
            grid_color: RGBAColor(209, 213, 219, 0.6),
            axis_color: RGBAColor(107, 114, 128, 1.0),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 13,
            caption_size: 18,
            margin: 10,
            label_area_size: 50,
        }
    }
}
