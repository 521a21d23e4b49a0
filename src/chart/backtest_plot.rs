use {
    super::{ChartResult, date_label, padded_range},
    crate::{
        config::plot::PLOT,
        engine::{MovingAverages, TradeMarker},
        models::TradeAction,
    },
    plotters::prelude::*,
    std::path::Path,
};

/// Close price, the three moving averages and the trade markers.
pub fn render_backtest_chart(path: &Path, averages: &MovingAverages, markers: &[TradeMarker]) -> ChartResult {
    let series = &averages.series;
    let (y_min, y_max) = padded_range([
        series.close_prices.as_slice(),
        averages.short.as_slice(),
        averages.medium.as_slice(),
        averages.long.as_slice(),
    ])
    .ok_or("no finite prices to plot")?;

    let root = BitMapBackend::new(path, PLOT.backtest_canvas).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Moving Average Backtest", series.symbol),
            (PLOT.font_family, PLOT.title_font_size),
        )
        .margin(PLOT.margin)
        .x_label_area_size(PLOT.x_label_area)
        .y_label_area_size(PLOT.y_label_area)
        .build_cartesian_2d(0usize..series.len(), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(PLOT.x_label_count)
        .x_label_formatter(&|idx| date_label(&series.timestamps, *idx))
        .bold_line_style(PLOT.color_grid.mix(0.7))
        .light_line_style(TRANSPARENT)
        .draw()?;

    let lines = [
        ("Close Price", series.close_prices.as_slice(), PLOT.color_price),
        ("Short MA", averages.short.as_slice(), PLOT.color_short_ma),
        ("Medium MA", averages.medium.as_slice(), PLOT.color_medium_ma),
        ("Long MA", averages.long.as_slice(), PLOT.color_long_ma),
    ];

    for (label, values, color) in lines {
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &v)| (i, v)),
                color.stroke_width(PLOT.price_line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    let s = PLOT.marker_size as i32 * 2;
    let label_font = (PLOT.font_family, PLOT.marker_label_font_size as f64).into_font();

    // Buy: up-triangle, label above
    let buy_font = label_font.clone().color(&PLOT.color_buy);
    chart
        .draw_series(markers.iter().filter(|m| m.action == TradeAction::Buy).map(|m| {
            EmptyElement::at((m.index, m.price))
                + Polygon::new(vec![(0, -s), (-s, s), (s, s)], PLOT.color_buy.filled())
                + Text::new("Buy", (-s, -3 * s), buy_font.clone())
        }))?
        .label("Buy")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), PLOT.marker_size, PLOT.color_buy.filled()));

    // Sell: down-triangle, label below
    let sell_font = label_font.color(&PLOT.color_sell);
    chart
        .draw_series(markers.iter().filter(|m| m.action == TradeAction::Sell).map(|m| {
            EmptyElement::at((m.index, m.price))
                + Polygon::new(vec![(-s, -s), (s, -s), (0, s)], PLOT.color_sell.filled())
                + Text::new("Sell", (-s, s + 2), sell_font.clone())
        }))?
        .label("Sell")
        .legend(|(x, y)| {
            let s = PLOT.marker_size as i32;
            Polygon::new(vec![(x + 10 - s, y - s), (x + 10 + s, y - s), (x + 10, y + s)], PLOT.color_sell.filled())
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((PLOT.font_family, PLOT.legend_font_size))
        .background_style(WHITE.mix(PLOT.legend_opacity))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    log::info!("Saved backtest chart to {}", path.display());
    Ok(())
}
