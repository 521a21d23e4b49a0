//! Plot visualization configuration

use plotters::style::RGBColor;

pub struct PlotConfig {
    /// Canvas size in pixels (width, height)
    pub pattern_canvas: (u32, u32),
    pub backtest_canvas: (u32, u32),

    pub font_family: &'static str,
    pub title_font_size: u32,
    pub legend_font_size: u32,
    pub marker_label_font_size: u32,

    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    /// Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)
    pub y_padding_pct: f64,
    /// Plot x axis divisions (number of date labels)
    pub x_label_count: usize,

    pub price_line_width: u32,
    pub marker_size: u32,

    // --- SERIES COLORS ---
    pub color_price: RGBColor,
    pub color_left_shoulder: RGBColor,
    pub color_head: RGBColor,
    pub color_right_shoulder: RGBColor,
    pub color_short_ma: RGBColor,
    pub color_medium_ma: RGBColor,
    pub color_long_ma: RGBColor,
    pub color_buy: RGBColor,
    pub color_sell: RGBColor,

    pub color_grid: RGBColor,
    /// Legend box transparency (0.0 = invisible, 1.0 = fully opaque)
    pub legend_opacity: f64,
}

pub const PLOT: PlotConfig = PlotConfig {
    pattern_canvas: (1500, 600),
    backtest_canvas: (1400, 700),

    font_family: "sans-serif",
    title_font_size: 32,
    legend_font_size: 24,
    marker_label_font_size: 20,

    margin: 20,
    x_label_area: 40,
    y_label_area: 70,
    y_padding_pct: 0.05,
    x_label_count: 10,

    price_line_width: 2,
    marker_size: 5,

    color_price: RGBColor(31, 119, 180),
    color_left_shoulder: RGBColor(220, 30, 30),
    color_head: RGBColor(30, 30, 220),
    color_right_shoulder: RGBColor(30, 160, 30),
    color_short_ma: RGBColor(255, 127, 14),
    color_medium_ma: RGBColor(148, 103, 189),
    color_long_ma: RGBColor(140, 86, 75),
    color_buy: RGBColor(30, 160, 30),
    color_sell: RGBColor(220, 30, 30),

    color_grid: RGBColor(200, 200, 200),
    legend_opacity: 0.5,
};
