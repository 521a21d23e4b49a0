use {
    super::{ChartResult, date_label, padded_range},
    crate::{
        config::plot::PLOT,
        models::{Detection, PriceSeries},
    },
    plotters::prelude::*,
    std::path::Path,
};

/// Price line with a marker on every detected shoulder and head.
pub fn render_pattern_chart(path: &Path, series: &PriceSeries, detections: &[Detection]) -> ChartResult {
    let closes = &series.close_prices;
    let (y_min, y_max) = padded_range([closes.as_slice()]).ok_or("no finite prices to plot")?;

    let root = BitMapBackend::new(path, PLOT.pattern_canvas).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Head and Shoulders Pattern Detection", series.symbol),
            (PLOT.font_family, PLOT.title_font_size),
        )
        .margin(PLOT.margin)
        .x_label_area_size(PLOT.x_label_area)
        .y_label_area_size(PLOT.y_label_area)
        .build_cartesian_2d(0usize..closes.len(), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(PLOT.x_label_count)
        .x_label_formatter(&|idx| date_label(&series.timestamps, *idx))
        .bold_line_style(PLOT.color_grid.mix(0.7))
        .light_line_style(TRANSPARENT)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            closes.iter().enumerate().map(|(i, &p)| (i, p)),
            PLOT.color_price.stroke_width(PLOT.price_line_width),
        ))?
        .label("Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PLOT.color_price.stroke_width(2)));

    let roles: [(&str, RGBColor, fn(&Detection) -> usize); 3] = [
        ("Left Shoulder", PLOT.color_left_shoulder, |d| d.pattern.left_shoulder),
        ("Head", PLOT.color_head, |d| d.pattern.head),
        ("Right Shoulder", PLOT.color_right_shoulder, |d| d.pattern.right_shoulder),
    ];

    for (label, color, index_of) in roles {
        chart
            .draw_series(detections.iter().map(|d| {
                let idx = index_of(d);
                Circle::new((idx, closes[idx]), PLOT.marker_size, color.filled())
            }))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), PLOT.marker_size, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((PLOT.font_family, PLOT.legend_font_size))
        .background_style(WHITE.mix(PLOT.legend_opacity))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    log::info!("Saved pattern chart to {}", path.display());
    Ok(())
}
