//! Capability interface for speech capture.
//!
//! The browser speech-recognition surface is abstracted into a small
//! start/stop trait that delivers events over a channel. Platform adapters
//! live with the platform; the crate ships only [`ScriptedCapture`], which
//! replays a canned transcript for demos and tests.

use tokio::sync::mpsc;

/// Events emitted by a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The transcript so far. Adapters emit the cumulative text, the way
    /// interim recognition results accumulate.
    Transcript(String),
    /// Capture finished normally.
    Ended,
    /// Capture failed; the message is adapter-specific.
    Error(String),
}

/// A speech-capture session.
///
/// `start` delivers events on the given sender until `Ended` or `Error`.
/// `stop` is idempotent and may be called on an idle session.
pub trait SpeechCapture {
    fn start(&mut self, events: mpsc::UnboundedSender<SpeechEvent>);
    fn stop(&mut self);
}

/// Replays a fixed transcript, one word at a time.
pub struct ScriptedCapture {
    transcript: String,
    active: bool,
}

impl ScriptedCapture {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            active: false,
        }
    }
}

impl SpeechCapture for ScriptedCapture {
    fn start(&mut self, events: mpsc::UnboundedSender<SpeechEvent>) {
        if self.active {
            let _ = events.send(SpeechEvent::Error("capture already running".to_owned()));
            return;
        }
        self.active = true;

        let mut spoken = String::new();
        for word in self.transcript.split_whitespace() {
            if !spoken.is_empty() {
                spoken.push(' ');
            }
            spoken.push_str(word);
            let _ = events.send(SpeechEvent::Transcript(spoken.clone()));
        }
        let _ = events.send(SpeechEvent::Ended);
        self.active = false;
    }

    fn stop(&mut self) {
        self.active = false;
    }
}

/// Drives a capture session to completion and returns the final transcript.
///
/// Only suitable for adapters that emit synchronously from `start`, like
/// [`ScriptedCapture`]; event-loop adapters need their own driver.
pub fn run_to_completion(capture: &mut dyn SpeechCapture) -> Result<String, String> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    capture.start(tx);

    let mut transcript = String::new();
    while let Ok(event) = rx.try_recv() {
        match event {
            SpeechEvent::Transcript(text) => transcript = text,
            SpeechEvent::Ended => break,
            SpeechEvent::Error(message) => return Err(message),
        }
    }
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_capture_accumulates_and_ends() {
        let mut capture = ScriptedCapture::new("is nvda a buy");
        let (tx, mut rx) = mpsc::unbounded_channel();
        capture.start(tx);

        assert_eq!(
            rx.try_recv(),
            Ok(SpeechEvent::Transcript("is".to_owned()))
        );
        assert_eq!(
            rx.try_recv(),
            Ok(SpeechEvent::Transcript("is nvda".to_owned()))
        );
        assert_eq!(
            rx.try_recv(),
            Ok(SpeechEvent::Transcript("is nvda a".to_owned()))
        );
        assert_eq!(
            rx.try_recv(),
            Ok(SpeechEvent::Transcript("is nvda a buy".to_owned()))
        );
        assert_eq!(rx.try_recv(), Ok(SpeechEvent::Ended));
    }

    #[test]
    fn run_to_completion_returns_final_transcript() {
        let mut capture = ScriptedCapture::new("what is the growth potential of tesla");
        let transcript = run_to_completion(&mut capture).unwrap();
        assert_eq!(transcript, "what is the growth potential of tesla");
    }

    #[test]
    fn empty_script_yields_empty_transcript() {
        let mut capture = ScriptedCapture::new("");
        assert_eq!(run_to_completion(&mut capture).unwrap(), "");
    }

    #[test]
    fn stop_is_idempotent() {
        let mut capture = ScriptedCapture::new("hello");
        capture.stop();
        capture.stop();
        assert_eq!(run_to_completion(&mut capture).unwrap(), "hello");
    }
}
