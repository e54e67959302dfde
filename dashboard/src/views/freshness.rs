use chrono::{DateTime, Utc};
use maud::{Markup, html};
use shared::timefmt::{self, Freshness};

use crate::styles::Cards as CardClass;

/// Compact "Updated ..." badge; the tooltip carries the retention policy.
pub fn freshness_badge(last_update: DateTime<Utc>, now: DateTime<Utc>) -> Markup {
    let state_class = match timefmt::classify(last_update, now) {
        Freshness::Recent => CardClass::BADGE_RECENT,
        Freshness::Stale => CardClass::BADGE_STALE,
    };
    let tooltip = format!(
        "Last data scrape: {}\nData expires {}\nData is refreshed every 6 hours and stored for 24 hours",
        last_update.format("%Y-%m-%d %H:%M UTC"),
        timefmt::expires_in(last_update, now),
    );
    html! {
        span.(CardClass::BADGE).(state_class) title=(tooltip) {
            "Updated " (timefmt::format_relative(last_update, now))
        }
    }
}

/// Badge plus a refresh control, for panels that can refetch their data.
pub fn freshness_indicator(
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    refresh_url: &str,
    target: &str,
) -> Markup {
    html! {
        div.(CardClass::FRESHNESS) {
            @if let Some(at) = last_update {
                (freshness_badge(at, now))
            } @else {
                span.(CardClass::BADGE).(CardClass::BADGE_STALE) { "No data yet" }
            }
            button.(CardClass::REFRESH_BTN)
                hx-get=(refresh_url)
                hx-target=(target)
                hx-swap="innerHTML"
            { "[refresh]" }
        }
    }
}
