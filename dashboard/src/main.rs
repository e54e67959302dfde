use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{delete, get, post};
use tracing::{info, warn};

use crate::state::AppState;

mod background;
mod charts;
mod config;
mod mocks;
mod news;
mod quotes;
mod state;
mod styles;
mod views;
mod watchlist;

#[tokio::main]
async fn main() -> Result<()> {
    shared::init_tracing!()?;
    let app_config = shared::load_app_config!()?;

    let state = Arc::new(AppState::new(&app_config));

    if let (Some(username), Some(password)) = (
        app_config.backend_username.as_deref(),
        app_config.backend_password.as_deref(),
    ) {
        match state.advisor.login(username, password).await {
            Ok(()) => info!("backend session established"),
            Err(e) => warn!("backend login failed, continuing with bundled data: {e}"),
        }
    }

    background::spawn_background_workers(Arc::clone(&state));

    // Per-stock routes: /stock/{ticker}
    let stock_routes = Router::new().route("/", get(views::stock_detail::stock_detail));

    // Fragment routes: /fragments/*
    let fragment_routes = Router::new()
        .route("/stock-cards", get(views::stock_list::fragment_stock_cards))
        .route("/news", get(views::news_feed::fragment_news))
        .route("/query-panel", get(views::query::fragment_query_panel))
        .route(
            "/stock/{ticker}/overview",
            get(views::stock_detail::fragment_overview),
        )
        .route(
            "/stock/{ticker}/insights",
            get(views::stock_detail::fragment_insights),
        )
        .route(
            "/stock/{ticker}/financials",
            get(views::stock_detail::fragment_financials),
        )
        .route(
            "/stock/{ticker}/chart",
            get(views::stock_detail::fragment_price_chart),
        );

    let app = Router::new()
        .route("/", get(views::index))
        .route("/styles.css", get(views::styles))
        .route("/query", post(views::query::submit_query))
        .route("/rag", post(views::query::submit_rag_query))
        .route("/voice", get(views::voice::voice_page))
        .route("/voice/capture", post(views::voice::capture))
        .route("/voice/transcript", post(views::voice::submit_transcript))
        .route("/voice/recording", post(views::voice::upload_recording))
        .route("/watchlist", post(views::watchlist_actions::add_ticker))
        .route(
            "/watchlist/{ticker}",
            delete(views::watchlist_actions::remove_ticker),
        )
        .nest("/stock/{ticker}", stock_routes)
        .nest("/fragments", fragment_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(app_config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", app_config.bind_addr))?;
    info!("dashboard listening on {}", app_config.bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
