use chrono::{Datelike, NaiveDate};
use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Text};

use crate::color::StationColors;
use crate::dashboard::{DailyTrend, StationAverages};

const BAR_COLOR: Color32 = Color32::from_rgb(135, 206, 235);

// ---------------------------------------------------------------------------
// Station averages (horizontal bar chart)
// ---------------------------------------------------------------------------

/// One bar per station, highest on top, value printed past the bar end.
pub fn station_bar_chart(ui: &mut Ui, averages: &StationAverages) {
    let names: Vec<String> = averages.means.iter().map(|m| m.station.clone()).collect();
    let max = averages.means.iter().map(|m| m.mean).fold(0.0, f64::max);
    let label_gap = (max * 0.01).max(0.5);

    let bars: Vec<Bar> = averages
        .means
        .iter()
        .enumerate()
        .map(|(i, m)| {
            Bar::new(i as f64, m.mean)
                .name(format!("{} (n = {})", m.station, m.samples))
                .fill(BAR_COLOR)
                .width(0.7)
        })
        .collect();

    let height = (averages.means.len() as f32 * 28.0).clamp(160.0, 420.0);

    Plot::new("station_averages")
        .height(height)
        .show_axes([false, true])
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(0.0)
        .include_x(max * 1.12)
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            for (i, m) in averages.means.iter().enumerate() {
                let text = Text::new(
                    PlotPoint::new(m.mean + label_gap, i as f64),
                    RichText::new(format!("{:.1}", m.mean)).size(12.0),
                )
                .anchor(Align2::LEFT_CENTER);
                plot_ui.text(text);
            }
        });
}

// ---------------------------------------------------------------------------
// Daily trend (line chart)
// ---------------------------------------------------------------------------

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn date_from_day_number(value: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
}

/// One line of daily means per selected station.
pub fn daily_trend_chart(ui: &mut Ui, trend: &DailyTrend, colors: &StationColors) {
    let mut plot = Plot::new("daily_trend")
        .height(360.0)
        .y_axis_label("Daily mean PM2.5 (µg/m³)")
        .x_axis_formatter(|mark, _range| {
            date_from_day_number(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|name, value| {
            let day = date_from_day_number(value.x)
                .map(|d| d.to_string())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{day}\n{:.1} µg/m³", value.y)
            } else {
                format!("{name}\n{day}\n{:.1} µg/m³", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if trend.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for series in &trend.series {
            let points: PlotPoints = series
                .points
                .iter()
                .map(|p| [day_number(p.date), p.mean])
                .collect();

            let line = Line::new(points)
                .name(&series.station)
                .color(colors.color_for(&series.station))
                .width(1.0);

            plot_ui.line(line);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_number_round_trip() {
        let d = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
        assert_eq!(date_from_day_number(day_number(d)), Some(d));
        assert_eq!(date_from_day_number(day_number(d) + 0.4), Some(d));
    }
}
