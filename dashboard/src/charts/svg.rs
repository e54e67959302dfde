use chrono::{DateTime, Utc};
use maud::{Markup, html};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 200.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 30.0;

const SPARK_WIDTH: f64 = 120.0;
const SPARK_HEIGHT: f64 = 36.0;

const TEXT_STYLE: &str = "fill: var(--foreground); font-family: inherit";
const SVG_CONTAINER_STYLE: &str = "width:100%;height:auto";

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

fn format_price(v: f64) -> String {
    format!("${v:.2}")
}

/// Price line over a time window, dollar-labelled y axis.
pub fn render_price_chart(closes: &[(DateTime<Utc>, f64)], label: &str) -> Markup {
    if closes.is_empty() {
        return empty_chart(label);
    }

    let max_val = closes.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
    let min_val = closes.iter().map(|(_, v)| *v).fold(f64::MAX, f64::min);
    let range = if (max_val - min_val).abs() < f64::EPSILON {
        1.0
    } else {
        max_val - min_val
    };

    let chart_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let mut points = String::new();
    for (i, (_, val)) in closes.iter().enumerate() {
        let x = MARGIN_LEFT + (i as f64 / (closes.len() - 1).max(1) as f64) * chart_w;
        let y = MARGIN_TOP + chart_h - ((val - min_val) / range) * chart_h;
        if !points.is_empty() {
            points.push(' ');
        }
        use std::fmt::Write;
        let _ = write!(points, "{x},{y}");
    }

    html! {
        svg viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) xmlns="http://www.w3.org/2000/svg" style=(SVG_CONTAINER_STYLE) {
            rect width=(WIDTH) height=(HEIGHT) style="fill: var(--background)" {}
            text x=(MARGIN_LEFT) y="14" font-size="12" style=(TEXT_STYLE) { (label) }
            text x=(MARGIN_LEFT - 5.0) y=(MARGIN_TOP + 10.0) font-size="10" text-anchor="end" style=(TEXT_STYLE) {
                (format_price(max_val))
            }
            text x=(MARGIN_LEFT - 5.0) y=(MARGIN_TOP + chart_h) font-size="10" text-anchor="end" style=(TEXT_STYLE) {
                (format_price(min_val))
            }
            polyline points=(points) fill="none" stroke-width="2" style="stroke: var(--primary)" {}
            @for (i, (ts, val)) in closes.iter().enumerate() {
                @let x = MARGIN_LEFT + (i as f64 / (closes.len() - 1).max(1) as f64) * chart_w;
                @let y = MARGIN_TOP + chart_h - ((val - min_val) / range) * chart_h;
                circle cx=(x) cy=(y) r="2.5" style="fill: var(--primary)" {
                    title { (format_time(*ts)) ": " (format_price(*val)) }
                }
            }
            (write_x_axis(closes, chart_w))
        }
    }
}

/// Small unlabelled trend line for stock cards, colored by direction over
/// the window.
pub fn render_sparkline(closes: &[(DateTime<Utc>, f64)]) -> Markup {
    if closes.len() < 2 {
        return html! {
            svg viewBox=(format!("0 0 {SPARK_WIDTH} {SPARK_HEIGHT}")) xmlns="http://www.w3.org/2000/svg" {
                line x1="0" y1=(SPARK_HEIGHT / 2.0) x2=(SPARK_WIDTH) y2=(SPARK_HEIGHT / 2.0)
                    stroke-width="1" style="stroke: var(--muted)" {}
            }
        };
    }

    let max_val = closes.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
    let min_val = closes.iter().map(|(_, v)| *v).fold(f64::MAX, f64::min);
    let range = if (max_val - min_val).abs() < f64::EPSILON {
        1.0
    } else {
        max_val - min_val
    };

    let first = closes.first().map(|(_, v)| *v).unwrap_or_default();
    let last = closes.last().map(|(_, v)| *v).unwrap_or_default();
    let stroke = if last >= first {
        "stroke: var(--positive)"
    } else {
        "stroke: var(--negative)"
    };

    let mut points = String::new();
    for (i, (_, val)) in closes.iter().enumerate() {
        let x = (i as f64 / (closes.len() - 1) as f64) * SPARK_WIDTH;
        let y = (SPARK_HEIGHT - 4.0) - ((val - min_val) / range) * (SPARK_HEIGHT - 8.0);
        if !points.is_empty() {
            points.push(' ');
        }
        use std::fmt::Write;
        let _ = write!(points, "{x},{y}");
    }

    html! {
        svg viewBox=(format!("0 0 {SPARK_WIDTH} {SPARK_HEIGHT}")) xmlns="http://www.w3.org/2000/svg" {
            polyline points=(points) fill="none" stroke-width="1.5" style=(stroke) {}
        }
    }
}

fn write_x_axis(closes: &[(DateTime<Utc>, f64)], chart_w: f64) -> Markup {
    let label_y = HEIGHT - 5.0;
    html! {
        @if let Some((ts, _)) = closes.first() {
            text x=(MARGIN_LEFT) y=(label_y) font-size="11" text-anchor="start" style=(TEXT_STYLE) {
                (format_time(*ts))
            }
        }
        @if closes.len() > 2 {
            @let mid = closes.len() / 2;
            @let mid_x = MARGIN_LEFT + chart_w / 2.0;
            text x=(mid_x) y=(label_y) font-size="11" text-anchor="middle" style=(TEXT_STYLE) {
                (format_time(closes[mid].0))
            }
        }
        @if let Some((ts, _)) = closes.last() {
            @let end_x = MARGIN_LEFT + chart_w;
            text x=(end_x) y=(label_y) font-size="11" text-anchor="end" style=(TEXT_STYLE) {
                (format_time(*ts))
            }
        }
    }
}

fn empty_chart(label: &str) -> Markup {
    html! {
        svg viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) xmlns="http://www.w3.org/2000/svg" style=(SVG_CONTAINER_STYLE) {
            rect width=(WIDTH) height=(HEIGHT) style="fill: var(--background)" {}
            text x=(WIDTH / 2.0) y=(HEIGHT / 2.0) font-size="14" text-anchor="middle" style=(TEXT_STYLE) {
                (label) " - no data"
            }
        }
    }
}
