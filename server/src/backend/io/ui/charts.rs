//! SVG charts for the dashboard, drawn with plotters.
//!
//! Only shapes are drawn; labels and legends are rendered in HTML next to
//! the chart so no font backend is needed.

use anyhow::{anyhow, Result};
use plotters::prelude::*;
use std::f64::consts::PI;

use crate::backend::domain::models::{sum_amounts, CategoryTotal, MonthlyTotal};

pub const DONUT_SIZE: u32 = 300;
const INNER_RADIUS: f64 = 60.0;
const OUTER_RADIUS: f64 = 140.0;

pub const BAR_WIDTH: u32 = 560;
pub const BAR_HEIGHT: u32 = 220;
/// Months shown in the bar chart
pub const BAR_MONTHS: usize = 12;

/// Vega's tableau20 scheme
pub const TABLEAU20: [RGBColor; 20] = [
    RGBColor(0x4c, 0x78, 0xa8),
    RGBColor(0x9e, 0xca, 0xe9),
    RGBColor(0xf5, 0x85, 0x18),
    RGBColor(0xff, 0xbf, 0x79),
    RGBColor(0x54, 0xa2, 0x4b),
    RGBColor(0x88, 0xd2, 0x7a),
    RGBColor(0xb7, 0x9a, 0x20),
    RGBColor(0xf2, 0xcf, 0x5b),
    RGBColor(0x43, 0x98, 0x94),
    RGBColor(0x83, 0xbc, 0xb6),
    RGBColor(0xe4, 0x57, 0x56),
    RGBColor(0xff, 0x9d, 0x98),
    RGBColor(0x79, 0x70, 0x6e),
    RGBColor(0xba, 0xb0, 0xac),
    RGBColor(0xd6, 0x71, 0x95),
    RGBColor(0xfc, 0xbf, 0xd2),
    RGBColor(0xb2, 0x79, 0xa2),
    RGBColor(0xd6, 0xa5, 0xc9),
    RGBColor(0x9e, 0x76, 0x5f),
    RGBColor(0xd8, 0xb5, 0xa5),
];

pub fn palette_color(index: usize) -> RGBColor {
    TABLEAU20[index % TABLEAU20.len()]
}

/// CSS hex for a palette entry, used by the HTML legend
pub fn palette_hex(index: usize) -> String {
    let RGBColor(r, g, b) = palette_color(index);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Donut of category totals. Slices follow the order of `totals`, starting
/// at twelve o'clock and going clockwise. `None` when nothing is positive.
pub fn category_donut(totals: &[CategoryTotal]) -> Result<Option<String>> {
    let sum = sum_amounts(totals.iter().map(|t| t.total.max(0)));
    if sum <= 0 {
        return Ok(None);
    }

    let center = (DONUT_SIZE as f64 / 2.0, DONUT_SIZE as f64 / 2.0);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (DONUT_SIZE, DONUT_SIZE)).into_drawing_area();

        let mut start = 0.0;
        for (index, total) in totals.iter().enumerate() {
            if total.total <= 0 {
                continue;
            }
            let sweep = total.total as f64 / sum as f64 * 2.0 * PI;
            let points = annular_sector(center, start, start + sweep);
            root.draw(&Polygon::new(points, palette_color(index).filled()))
                .map_err(|e| anyhow!(e.to_string()))?;
            start += sweep;
        }

        root.present().map_err(|e| anyhow!(e.to_string()))?;
    }
    Ok(Some(svg))
}

/// Outline of a ring segment between two angles measured clockwise from the top.
fn annular_sector(center: (f64, f64), from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = (((to - from) / (PI / 90.0)).ceil() as usize).max(2);
    let point = |radius: f64, angle: f64| {
        let theta = angle - PI / 2.0;
        (
            (center.0 + radius * theta.cos()).round() as i32,
            (center.1 + radius * theta.sin()).round() as i32,
        )
    };

    let mut points = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        points.push(point(OUTER_RADIUS, from + (to - from) * i as f64 / steps as f64));
    }
    for i in (0..=steps).rev() {
        points.push(point(INNER_RADIUS, from + (to - from) * i as f64 / steps as f64));
    }
    points
}

/// Bars for the most recent months, oldest on the left. `None` when there
/// is nothing to show.
pub fn monthly_bars(totals: &[MonthlyTotal]) -> Result<Option<String>> {
    let recent = &totals[totals.len().saturating_sub(BAR_MONTHS)..];
    let max = recent.iter().map(|t| t.total).max().unwrap_or(0);
    if max <= 0 {
        return Ok(None);
    }

    let padding = 10;
    let slot = (BAR_WIDTH as i32 - 2 * padding) / BAR_MONTHS as i32;
    let usable_height = BAR_HEIGHT as i32 - 2 * padding;
    let baseline = BAR_HEIGHT as i32 - padding;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (BAR_WIDTH, BAR_HEIGHT)).into_drawing_area();

        root.draw(&Rectangle::new(
            [(padding, baseline), (BAR_WIDTH as i32 - padding, baseline + 1)],
            BLACK.mix(0.3).filled(),
        ))
        .map_err(|e| anyhow!(e.to_string()))?;

        for (i, total) in recent.iter().enumerate() {
            let height = (total.total.max(0) as f64 / max as f64 * usable_height as f64).round() as i32;
            let x0 = padding + i as i32 * slot + slot / 6;
            let x1 = padding + (i as i32 + 1) * slot - slot / 6;
            root.draw(&Rectangle::new(
                [(x0, baseline - height), (x1, baseline)],
                palette_color(0).filled(),
            ))
            .map_err(|e| anyhow!(e.to_string()))?;
        }

        root.present().map_err(|e| anyhow!(e.to_string()))?;
    }
    Ok(Some(svg))
}
