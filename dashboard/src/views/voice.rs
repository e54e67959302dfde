use std::sync::Arc;

use advisor::{MediaKind, RagContext, RagQuery};
use axum::Form;
use axum::extract::{Multipart, Query, State};
use maud::{Markup, html};
use serde::Deserialize;
use shared::speech::{ScriptedCapture, run_to_completion};
use tracing::warn;

use crate::mocks;
use crate::state::AppState;
use crate::styles::Global as GlobalClass;
use crate::styles::Panels as PanelClass;

use super::TickerQuery;
use super::breadcrumbs::{Breadcrumb, breadcrumbs};
use super::page_shell;
use super::query::rag_analysis;

pub async fn voice_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Markup {
    let ticker = super::selected_ticker(&state, query.ticker.as_deref());

    let content = html! {
        (breadcrumbs(&[
            Breadcrumb { label: "dashboard", href: Some("/") },
            Breadcrumb { label: "voice", href: None },
        ]))

        div.(PanelClass::VOICE_PANEL) {
            h1.(GlobalClass::PAGE_TITLE) { "Voice Interaction" }

            div #transcript-box .(PanelClass::TRANSCRIPT_BOX) {
                p.(GlobalClass::MUTED) { "Press the microphone button to start speaking" }
            }

            button.(PanelClass::MIC_BTN)
                hx-post=(format!("/voice/capture?ticker={ticker}"))
                hx-target="#transcript-box"
                hx-swap="innerHTML"
            { "Start listening" }

            div #voice-analysis {}

            form.(PanelClass::RECORDING_FORM)
                hx-post="/voice/recording"
                hx-encoding="multipart/form-data"
                hx-target="#voice-analysis"
                hx-swap="innerHTML"
            {
                div.(PanelClass::FIELD) {
                    label.(PanelClass::FIELD_LABEL) for="recording-file" { "Or upload a recording" }
                    input #recording-file type="file" name="file" accept="audio/*,video/*";
                }
                div.(PanelClass::FIELD) {
                    label.(PanelClass::FIELD_LABEL) for="recording-type" { "Recording type" }
                    select #recording-type name="type" {
                        option value="voice" selected { "Voice" }
                        option value="video" { "Video" }
                    }
                }
                button.(PanelClass::SUBMIT_BTN) type="submit" { "Submit recording" }
            }
        }
    };
    page_shell("Voice | Finquiry", content)
}

/// Simulated capture: drives the scripted recognizer to completion and
/// hands the transcript back for review, the way interim browser results
/// would fill the box.
pub async fn capture(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Markup {
    let ticker = super::selected_ticker(&state, query.ticker.as_deref());
    let company = {
        let quotes = state.quotes.read().unwrap();
        quotes
            .get(&ticker)
            .map(|q| q.company_name.clone())
            .unwrap_or_else(|| ticker.clone())
    };

    let mut recognizer = ScriptedCapture::new(format!(
        "what is the outlook for {company} over the next quarter"
    ));
    match run_to_completion(&mut recognizer) {
        Ok(transcript) => html! {
            form hx-post="/voice/transcript" hx-target="#voice-analysis" hx-swap="innerHTML" {
                input type="hidden" name="ticker" value=(ticker);
                div.(PanelClass::FIELD) {
                    textarea name="transcript" rows="3" { (transcript) }
                }
                button.(PanelClass::SUBMIT_BTN) type="submit" { "Get Financial Advice" }
            }
        },
        Err(message) => {
            warn!("speech capture failed: {message}");
            html! {
                p.(GlobalClass::ERROR_NOTE) { "Speech capture failed. Please try again." }
            }
        }
    }
}

#[derive(Deserialize)]
pub struct TranscriptRequest {
    pub ticker: String,
    pub transcript: String,
}

pub async fn submit_transcript(
    State(state): State<Arc<AppState>>,
    Form(request): Form<TranscriptRequest>,
) -> Markup {
    let transcript = request.transcript.trim();
    if transcript.is_empty() {
        return html! {
            p.(GlobalClass::ERROR_NOTE) { "Nothing was transcribed. Try speaking again." }
        };
    }

    let rag_query = RagQuery {
        query: transcript.to_owned(),
        context: Some(RagContext {
            ticker: Some(request.ticker.clone()),
            timeframe: None,
            risk_tolerance: None,
        }),
    };

    let response = match state.advisor.rag_query(rag_query).await {
        Ok(response) => response,
        Err(e) => {
            warn!("voice rag query failed, answering locally: {e}");
            let company = {
                let quotes = state.quotes.read().unwrap();
                quotes
                    .get(&request.ticker)
                    .map(|q| q.company_name.clone())
                    .unwrap_or_else(|| request.ticker.clone())
            };
            mocks::canned_rag_response(&company)
        }
    };

    html! {
        (rag_analysis(&response))
        (video_response(&request.ticker))
    }
}

fn video_response(ticker: &str) -> Markup {
    html! {
        div.(PanelClass::VIDEO_FRAME) {
            p { "Video analysis for " (ticker) }
            p.(GlobalClass::MUTED) { "This is a placeholder for the video response feature." }
        }
    }
}

pub async fn upload_recording(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Markup {
    let mut filename = "recording.webm".to_owned();
    let mut bytes: Option<Vec<u8>> = None;
    let mut kind = MediaKind::Voice;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("malformed recording upload: {e}");
                return upload_error();
            }
        };
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                if let Some(original) = field.file_name() {
                    filename = original.to_owned();
                }
                match field.bytes().await {
                    Ok(data) => bytes = Some(data.to_vec()),
                    Err(e) => {
                        warn!("failed to read uploaded recording: {e}");
                        return upload_error();
                    }
                }
            }
            Some("type") => {
                if let Ok(value) = field.text().await {
                    if value == "video" {
                        kind = MediaKind::Video;
                    }
                }
            }
            _ => {}
        }
    }

    let Some(bytes) = bytes else {
        return html! {
            p.(GlobalClass::ERROR_NOTE) { "Choose a recording to upload first." }
        };
    };

    match state.advisor.create_embedding(filename, bytes, kind).await {
        Ok(()) => html! {
            div.(PanelClass::ANALYSIS) {
                p { "Recording submitted for analysis." }
            }
        },
        Err(e) => {
            warn!("embedding upload failed: {e}");
            upload_error()
        }
    }
}

fn upload_error() -> Markup {
    html! {
        p.(GlobalClass::ERROR_NOTE) { "Could not submit the recording. Please try again later." }
    }
}
