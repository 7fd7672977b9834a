// @file: src/render/chart.rs
// @description: SVG price chart with a volume sub-panel on a continuous time axis.
// @author: LAS.

use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use crate::core::errors::LoaderError;
use crate::core::interfaces::ChartRenderer;
use crate::core::series::TimeSeries;
use crate::utils::config::{AppConfig, ChartStyle};


//
// CONSTANTS
//

const PRICE_PANEL_SHARE: u32 = 70; // percent of the area below the title
const AXIS_DATE_FORMAT: &str = "%Y-%m-%d";


//
// RENDERER
//

pub struct SvgChartRenderer {
    output_dir: PathBuf,
    style: ChartStyle,
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, style: ChartStyle, width: u32, height: u32) -> Self {
        SvgChartRenderer { output_dir: output_dir.into(), style, width, height }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.chart_dir, config.chart_style, config.chart_width, config.chart_height)
    }

    pub fn chart_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!("{}.svg", slugify(title)))
    }

    fn draw(&self, path: &Path, series: &TimeSeries, title: &str) -> Result<(), Box<dyn Error>> {
        // #1. Axis ranges. A zero-width span is widened so the coordinate system stays valid.
        let (start, mut end) = series.span().ok_or("series has no rows")?;
        if end <= start {
            end = start
                .checked_add_signed(Duration::days(1))
                .ok_or("time axis runs past the last representable instant")?;
        }
        let (low, high) = series.price_bounds().ok_or("series has no prices")?;
        let pad = if high > low { (high - low) * 0.02 } else { high.abs().max(1.0) * 0.01 };
        let (low, high) = (low - pad, high + pad);
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(format!("price range {}..{} is not drawable", low, high).into());
        }
        let volume_top = match series.max_volume() {
            Some(v) if v.is_finite() && v > 0.0 => v * 1.1,
            _ => 1.0,
        };

        // #2. Layout
        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(title, ("sans-serif", 22))?;
        let split_at = root.dim_in_pixel().1 * PRICE_PANEL_SHARE / 100;
        let (upper, lower) = root.split_vertically(split_at);

        // #3. Price panel
        let mut price_chart = ChartBuilder::on(&upper)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(start..end, low..high)?;

        price_chart.configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|t: &DateTime<Utc>| t.format(AXIS_DATE_FORMAT).to_string())
            .y_desc("Price")
            .draw()?;

        match self.style {
            ChartStyle::Line => {
                price_chart.draw_series(LineSeries::new(
                    series.iter().map(|r| (r.timestamp, r.candle.close)),
                    &BLUE,
                ))?;
            }
            ChartStyle::Candlestick => {
                let body_width = (self.width as usize * 6 / 10 / series.len().max(1)).clamp(1, 15) as u32;
                price_chart.draw_series(series.iter().map(|r| {
                    CandleStick::new(
                        r.timestamp,
                        r.candle.open,
                        r.candle.high,
                        r.candle.low,
                        r.candle.close,
                        GREEN.filled(),
                        RED.filled(),
                        body_width,
                    )
                }))?;
            }
        }

        // #4. Volume panel. Bars span open to close time, gaps stay visible.
        let mut volume_chart = ChartBuilder::on(&lower)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(start..end, 0.0..volume_top)?;

        volume_chart.configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|t: &DateTime<Utc>| t.format(AXIS_DATE_FORMAT).to_string())
            .y_desc("Volume")
            .draw()?;

        volume_chart.draw_series(series.iter().map(|r| {
            let right = DateTime::from_timestamp_millis(r.candle.close_time)
                .filter(|t| *t > r.timestamp)
                .unwrap_or(r.timestamp);
            Rectangle::new([(r.timestamp, 0.0), (right, r.candle.volume)], BLUE.mix(0.4).filled())
        }))?;

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, series: &TimeSeries, title: &str) -> Result<PathBuf, LoaderError> {
        if series.is_empty() {
            return Err(LoaderError::Render(format!("`{}` has no candles to draw", title)));
        }

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| LoaderError::Render(format!("cannot create {}: {}", self.output_dir.display(), e)))?;

        let path = self.chart_path(title);
        self.draw(&path, series, title)
            .map_err(|e| LoaderError::Render(format!("`{}`: {}", title, e)))?;
        Ok(path)
    }
}


//
// INTERNAL HELPERS
//

// "BTCUSDT - Last Day" -> "btcusdt_last_day"
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("chart");
    }
    slug
}

