use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use maud::{Markup, html};

use crate::charts::{self, svg};
use crate::config::{CHART_BUCKET_COUNT, MIN_BUCKET_SECONDS};
use crate::quotes::{self, Recommendation, RiskLevel, StockQuote};
use crate::state::AppState;
use crate::styles::Charts as ChartClass;
use crate::styles::Global as GlobalClass;
use crate::styles::Panels as PanelClass;

use super::WindowQuery;
use super::breadcrumbs::{Breadcrumb, breadcrumbs};
use super::freshness::freshness_badge;
use super::page_shell;

/// Chart windows: `(query_key, display_label, seconds)`. The widest window
/// matches the price-history retention period.
const TIME_WINDOWS: &[(&str, &str, i64)] = &[
    ("1h", "1h", 3600),
    ("6h", "6h", 3600 * 6),
    ("12h", "12h", 3600 * 12),
    ("1d", "1d (all)", 86400),
];

const DEFAULT_WINDOW: &str = "6h";

/// Resolves a `?window=` query param to `(seconds, key)`, falling back to
/// [`DEFAULT_WINDOW`].
fn parse_window(window: Option<&str>) -> (i64, &str) {
    let key = window.unwrap_or(DEFAULT_WINDOW);
    for &(k, _, secs) in TIME_WINDOWS {
        if k == key {
            return (secs, k);
        }
    }
    (3600 * 6, DEFAULT_WINDOW)
}

pub async fn stock_detail(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Markup, StatusCode> {
    let now = Utc::now();
    let quotes = state.quotes.read().unwrap();
    let quote = quotes.get(&ticker).ok_or(StatusCode::NOT_FOUND)?;

    let header = html! {
        (breadcrumbs(&[
            Breadcrumb { label: "stocks", href: Some("/") },
            Breadcrumb { label: &ticker, href: None },
        ]))

        div.(GlobalClass::PAGE_HEADER) {
            div {
                h1.(GlobalClass::PAGE_TITLE) { (quote.company_name) " " span.(GlobalClass::MUTED) { "$" (quote.ticker) } }
                div {
                    span.(GlobalClass::PAGE_SUBTITLE) { (format!("${:.2} ", quote.price)) }
                    @if quote.is_positive() {
                        span style="color: var(--positive)" { (format!("▲ +{:.2} ({:+.2}%)", quote.change, quote.change_percent)) }
                    } @else {
                        span style="color: var(--negative)" { (format!("▼ {:.2} ({:+.2}%)", quote.change, quote.change_percent)) }
                    }
                }
            }
            (freshness_badge(quote.last_refreshed, now))
        }
    };

    let overview = overview_content(quote, now, None);
    drop(quotes);

    let content = html! {
        (header)

        div.(GlobalClass::TAB_BAR) {
            button.(GlobalClass::TAB_BTN).(GlobalClass::TAB_ACTIVE)
                hx-get=(format!("/fragments/stock/{ticker}/overview"))
                hx-target="#tab-panel" hx-swap="innerHTML"
            { "Overview" }
            button.(GlobalClass::TAB_BTN)
                hx-get=(format!("/fragments/stock/{ticker}/insights"))
                hx-target="#tab-panel" hx-swap="innerHTML"
            { "AI Insights" }
            button.(GlobalClass::TAB_BTN)
                hx-get=(format!("/fragments/stock/{ticker}/financials"))
                hx-target="#tab-panel" hx-swap="innerHTML"
            { "Financials" }
        }
        div #tab-panel {
            (overview)
        }
    };
    Ok(page_shell(&format!("{ticker} | Finquiry"), content))
}

pub async fn fragment_overview(
    Path(ticker): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Markup, StatusCode> {
    let now = Utc::now();
    let quotes = state.quotes.read().unwrap();
    let quote = quotes.get(&ticker).ok_or(StatusCode::NOT_FOUND)?;
    Ok(overview_content(quote, now, query.window.as_deref()))
}

fn overview_content(quote: &StockQuote, now: DateTime<Utc>, window: Option<&str>) -> Markup {
    let (day_low, day_high) = quote.day_range();
    let position = quote.position_in_52w_range();
    let valuation = if quote.pe_ratio > 25.0 {
        ("High", 80.0)
    } else if quote.pe_ratio > 15.0 {
        ("Average", 60.0)
    } else {
        ("Low", 40.0)
    };

    html! {
        div.(GlobalClass::PANEL_GRID) {
            div.(GlobalClass::PANEL) {
                div.(GlobalClass::PANEL_TITLE) { "Price Information" }
                div.(GlobalClass::STAT_GRID) {
                    div {
                        div.(GlobalClass::STAT_LABEL) { "Open" }
                        div.(GlobalClass::STAT_VALUE) { (format!("${:.2}", quote.open)) }
                    }
                    div {
                        div.(GlobalClass::STAT_LABEL) { "Previous Close" }
                        div.(GlobalClass::STAT_VALUE) { (format!("${:.2}", quote.prev_close)) }
                    }
                    div {
                        div.(GlobalClass::STAT_LABEL) { "Day Range" }
                        div.(GlobalClass::STAT_VALUE) { (format!("${day_low:.2} - ${day_high:.2}")) }
                    }
                    div {
                        div.(GlobalClass::STAT_LABEL) { "Volume" }
                        div.(GlobalClass::STAT_VALUE) { (quotes::format_market_value(quote.volume)) }
                    }
                }
                div.(GlobalClass::METER_LABELS) {
                    span { (format!("52-Week Low: ${:.2}", quote.low_52w)) }
                    span { (format!("52-Week High: ${:.2}", quote.high_52w)) }
                }
                div.(GlobalClass::METER) {
                    div.(GlobalClass::METER_FILL) style=(format!("width: {position:.0}%")) {}
                }
                div.(GlobalClass::MUTED) style="font-size: 0.75rem" {
                    (format!("Current price is {position:.0}% of 52-week range"))
                }
            }

            div.(GlobalClass::PANEL) {
                div.(GlobalClass::PANEL_TITLE) { "Company Fundamentals" }
                div.(GlobalClass::STAT_GRID) {
                    div {
                        div.(GlobalClass::STAT_LABEL) { "Market Cap" }
                        div.(GlobalClass::STAT_VALUE) { (quotes::format_market_value(quote.market_cap)) }
                    }
                    div {
                        div.(GlobalClass::STAT_LABEL) { "P/E Ratio" }
                        div.(GlobalClass::STAT_VALUE) { (format!("{:.2}", quote.pe_ratio)) }
                    }
                    div {
                        div.(GlobalClass::STAT_LABEL) { "EPS" }
                        div.(GlobalClass::STAT_VALUE) { (format!("${:.2}", quote.eps)) }
                    }
                    div {
                        div.(GlobalClass::STAT_LABEL) { "Dividend Yield" }
                        div.(GlobalClass::STAT_VALUE) { (format!("{:.2}%", quote.dividend_yield * 100.0)) }
                    }
                }
                div.(GlobalClass::METER_LABELS) {
                    span { "Relative Valuation" }
                    span { "vs. Sector Average" }
                }
                div.(GlobalClass::METER) {
                    div.(GlobalClass::METER_FILL) style=(format!("width: {:.0}%", valuation.1)) {}
                }
                div.(GlobalClass::MUTED) style="font-size: 0.75rem" { (valuation.0) }
            }
        }

        div #chart-container
            hx-get=(format!("/fragments/stock/{}/chart", quote.ticker))
            hx-trigger="every 60s"
            hx-swap="innerHTML"
        {
            (price_section(quote, now, window))
        }
    }
}

pub async fn fragment_price_chart(
    Path(ticker): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Markup, StatusCode> {
    let now = Utc::now();
    let quotes = state.quotes.read().unwrap();
    let quote = quotes.get(&ticker).ok_or(StatusCode::NOT_FOUND)?;
    Ok(price_section(quote, now, query.window.as_deref()))
}

fn price_section(quote: &StockQuote, now: DateTime<Utc>, window: Option<&str>) -> Markup {
    let (window_secs, active_window) = parse_window(window);
    let start = now - Duration::seconds(window_secs);

    let buckets = charts::bucket_points(
        &quote.history,
        start,
        now,
        CHART_BUCKET_COUNT,
        MIN_BUCKET_SECONDS,
    );
    let closes = charts::aggregate_close(&buckets);
    let chart_label = format!("{} price", quote.ticker);

    html! {
        div.(ChartClass::TIME_WINDOW_SELECTOR) {
            @for &(key, label, _) in TIME_WINDOWS {
                button
                    .(ChartClass::TIME_WINDOW_BTN)
                    .(if key == active_window { ChartClass::TIME_WINDOW_ACTIVE } else { "" })
                    hx-get=(format!("/fragments/stock/{}/chart?window={key}", quote.ticker))
                    hx-target="#chart-container"
                    hx-swap="innerHTML"
                { (label) }
            }
        }
        div.(ChartClass::CHART_CONTAINER) {
            (svg::render_price_chart(&closes, &chart_label))
        }
    }
}

pub async fn fragment_insights(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Markup, StatusCode> {
    let quotes = state.quotes.read().unwrap();
    let quote = quotes.get(&ticker).ok_or(StatusCode::NOT_FOUND)?;
    let insights = &quote.insights;

    let rec_class = match insights.recommendation {
        Recommendation::Buy => PanelClass::REC_BUY,
        Recommendation::Sell => PanelClass::REC_SELL,
        Recommendation::Hold => PanelClass::REC_HOLD,
    };
    let risk_class = match insights.risk_level {
        RiskLevel::Low => PanelClass::RISK_LOW,
        RiskLevel::Medium => PanelClass::RISK_MEDIUM,
        RiskLevel::High => PanelClass::RISK_HIGH,
    };

    Ok(html! {
        div.(GlobalClass::PANEL) {
            div.(GlobalClass::PANEL_TITLE) { "AI-Powered Investment Insights" }
            p.(GlobalClass::MUTED) { "Analysis based on latest news, trends, and financial data" }

            p { (insights.summary) }

            div.(PanelClass::INSIGHT_COLS) {
                div {
                    div.(PanelClass::INSIGHT_PROS) { "Potential Advantages" }
                    ul {
                        @for pro in &insights.pros {
                            li { (pro) }
                        }
                    }
                }
                div {
                    div.(PanelClass::INSIGHT_CONS) { "Potential Risks" }
                    ul {
                        @for con in &insights.cons {
                            li { (con) }
                        }
                    }
                }
            }

            div.(PanelClass::INSIGHT_STATS) {
                div.(GlobalClass::PANEL) {
                    div.(GlobalClass::STAT_LABEL) { "Recommendation" }
                    div.(rec_class) { (insights.recommendation.display_name()) }
                }
                div.(GlobalClass::PANEL) {
                    div.(GlobalClass::STAT_LABEL) { "Risk Level" }
                    div.(risk_class) { (insights.risk_level.display_name()) }
                }
                div.(GlobalClass::PANEL) {
                    div.(GlobalClass::STAT_LABEL) { "Confidence Score" }
                    div.(GlobalClass::STAT_VALUE) style="font-size: 1.4rem" {
                        (insights.recommendation.confidence_percent()) "%"
                    }
                }
            }
        }

        div.(GlobalClass::PANEL) {
            div.(GlobalClass::PANEL_TITLE) { "Ask about this stock" }
            form.(PanelClass::QUERY_FORM) hx-post="/rag" hx-target="#rag-analysis" hx-swap="innerHTML" {
                input type="hidden" name="ticker" value=(ticker);
                div.(PanelClass::FIELD) {
                    label.(PanelClass::FIELD_LABEL) for="rag-query" { "Your question" }
                    textarea #rag-query name="query" rows="3"
                        placeholder="Example: How exposed is this company to rising rates?" {}
                }
                div.(GlobalClass::STAT_GRID) {
                    div.(PanelClass::FIELD) {
                        label.(PanelClass::FIELD_LABEL) for="rag-timeframe" { "Timeframe" }
                        select #rag-timeframe name="timeframe" {
                            option value="1w" { "1 week" }
                            option value="1m" selected { "1 month" }
                            option value="3m" { "3 months" }
                            option value="1y" { "1 year" }
                        }
                    }
                    div.(PanelClass::FIELD) {
                        label.(PanelClass::FIELD_LABEL) for="rag-risk" { "Risk tolerance" }
                        select #rag-risk name="risk_tolerance" {
                            option value="low" { "Low" }
                            option value="medium" selected { "Medium" }
                            option value="high" { "High" }
                        }
                    }
                }
                button.(PanelClass::SUBMIT_BTN) type="submit" { "Get Financial Insights" }
            }
            div #rag-analysis {}
        }
    })
}

pub async fn fragment_financials(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Markup, StatusCode> {
    let quotes = state.quotes.read().unwrap();
    let quote = quotes.get(&ticker).ok_or(StatusCode::NOT_FOUND)?;

    Ok(html! {
        div.(GlobalClass::PANEL) {
            div.(GlobalClass::PANEL_TITLE) { "Quarterly Financial Data" }
            p.(GlobalClass::MUTED) { "Last four quarters financial performance" }
            table.(GlobalClass::DATA_TABLE) {
                thead {
                    tr {
                        th { "Quarter" }
                        th { "Revenue" }
                        th { "Net Income" }
                        th { "EPS" }
                        th { "Growth" }
                    }
                }
                tbody {
                    @for row in quarterly_rows(quote) {
                        tr {
                            td { (row.quarter) }
                            td { (quotes::format_market_value(row.revenue)) }
                            td { (quotes::format_market_value(row.net_income)) }
                            td { (format!("${:.2}", row.eps)) }
                            td style="color: var(--positive)" { (format!("+{:.1}%", row.growth)) }
                        }
                    }
                }
            }
        }
    })
}

struct QuarterRow {
    quarter: &'static str,
    revenue: f64,
    net_income: f64,
    eps: f64,
    growth: f64,
}

/// Indicative quarterly figures scaled off market cap and EPS, the same way
/// the mock feed derives them.
fn quarterly_rows(quote: &StockQuote) -> [QuarterRow; 4] {
    [
        QuarterRow {
            quarter: "Q1 2023",
            revenue: quote.market_cap * 0.05,
            net_income: quote.market_cap * 0.012,
            eps: quote.eps * 0.8,
            growth: 12.4,
        },
        QuarterRow {
            quarter: "Q2 2023",
            revenue: quote.market_cap * 0.055,
            net_income: quote.market_cap * 0.014,
            eps: quote.eps * 0.9,
            growth: 15.2,
        },
        QuarterRow {
            quarter: "Q3 2023",
            revenue: quote.market_cap * 0.06,
            net_income: quote.market_cap * 0.015,
            eps: quote.eps * 0.95,
            growth: 8.7,
        },
        QuarterRow {
            quarter: "Q4 2023",
            revenue: quote.market_cap * 0.065,
            net_income: quote.market_cap * 0.016,
            eps: quote.eps,
            growth: 10.3,
        },
    ]
}
