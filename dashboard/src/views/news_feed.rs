use std::sync::Arc;

use advisor::{NewsArticle, Sentiment};
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use maud::{Markup, html};
use serde::Deserialize;
use shared::timefmt;
use tracing::warn;

use crate::mocks;
use crate::state::AppState;
use crate::styles::News as NewsClass;

use super::freshness::freshness_indicator;

#[derive(Deserialize)]
pub struct NewsQuery {
    pub ticker: Option<String>,
    #[serde(default)]
    pub force: bool,
}

pub async fn fragment_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Markup {
    let ticker = super::selected_ticker(&state, query.ticker.as_deref());
    let now = Utc::now();

    let needs_fetch = query.force || { state.news.read().unwrap().is_stale(&ticker, now) };
    if needs_fetch {
        let articles = match state.advisor.stock_news(&ticker).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("news fetch for {ticker} failed, using bundled samples: {e}");
                mocks::sample_news(&ticker, now)
            }
        };
        let mut news = state.news.write().unwrap();
        news.replace(&ticker, articles, now);
        news.prune(now);
    }

    let news = state.news.read().unwrap();
    let articles = news.articles(&ticker);
    let fetched_at = news.fetched_at(&ticker);

    html! {
        div #news-feed
            hx-get=(format!("/fragments/news?ticker={ticker}"))
            hx-trigger="every 60s"
            hx-swap="outerHTML"
        {
            @if articles.is_empty() {
                p.(NewsClass::NEWS_EMPTY) { "No recent news for $" (ticker) "." }
            } @else {
                @for article in &articles {
                    (news_card(article, now))
                }
            }
            (freshness_indicator(
                fetched_at,
                now,
                &format!("/fragments/news?ticker={ticker}&force=true"),
                "#main-panel",
            ))
        }
    }
}

fn news_card(article: &NewsArticle, now: DateTime<Utc>) -> Markup {
    html! {
        article.(NewsClass::NEWS_CARD) {
            div.(NewsClass::NEWS_BADGES) {
                span.(NewsClass::SENTIMENT_BADGE) { "$" (article.ticker) }
                @if let Some(sentiment) = article.sentiment {
                    (sentiment_badge(sentiment))
                }
            }
            @if let Some(image_url) = &article.image_url {
                img.(NewsClass::NEWS_IMAGE) src=(image_url) alt=(article.title) loading="lazy";
            }
            h3.(NewsClass::NEWS_TITLE) { (article.title) }
            div.(NewsClass::NEWS_META) {
                span { (timefmt::format_relative(article.published_at, now)) }
                span { (article.source) }
                @if let Some(author) = &article.author {
                    span { (author) }
                }
            }
            p.(NewsClass::NEWS_SUMMARY) { (article.summary) }
            a.(NewsClass::NEWS_LINK) href=(article.url) target="_blank" rel="noopener noreferrer" {
                "Read Full Article →"
            }
        }
    }
}

pub fn sentiment_badge(sentiment: Sentiment) -> Markup {
    let class = match sentiment {
        Sentiment::Positive => NewsClass::SENTIMENT_POSITIVE,
        Sentiment::Negative => NewsClass::SENTIMENT_NEGATIVE,
        Sentiment::Neutral => NewsClass::SENTIMENT_NEUTRAL,
    };
    html! {
        span.(NewsClass::SENTIMENT_BADGE).(class) { (sentiment.label()) }
    }
}
