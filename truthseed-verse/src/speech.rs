//! Speech playback boundary.
//!
//! The actual text-to-speech engine lives outside this crate; this module
//! states the contract and ships a logging no-op implementation so embedders
//! without an engine still get correct status transitions.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Playback speed selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechRate {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeechRate {
    /// Rate factor applied to the engine's base speed.
    pub fn factor(&self) -> f32 {
        match self {
            SpeechRate::Slow => 0.8,
            SpeechRate::Normal => 1.0,
            SpeechRate::Fast => 1.2,
        }
    }
}

/// Playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechStatus {
    #[default]
    Idle,
    Speaking,
    Paused,
}

/// Contract for a text-to-speech backend.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Speak plain text at the given rate. Resolves when playback ends.
    async fn speak(&self, text: &str, rate: SpeechRate);

    fn pause(&self);
    fn resume(&self);
    fn cancel(&self);
    fn status(&self) -> SpeechStatus;
}

/// No-op backend that only tracks status.
#[derive(Default)]
pub struct NullSpeechService {
    status: Mutex<SpeechStatus>,
}

impl NullSpeechService {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_status(&self, status: SpeechStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }
}

#[async_trait]
impl SpeechService for NullSpeechService {
    async fn speak(&self, text: &str, rate: SpeechRate) {
        debug!(chars = text.len(), rate = rate.factor(), "speech requested (no engine)");
        self.set_status(SpeechStatus::Speaking);
        self.set_status(SpeechStatus::Idle);
    }

    fn pause(&self) {
        if self.status() == SpeechStatus::Speaking {
            self.set_status(SpeechStatus::Paused);
        }
    }

    fn resume(&self) {
        if self.status() == SpeechStatus::Paused {
            self.set_status(SpeechStatus::Speaking);
        }
    }

    fn cancel(&self) {
        self.set_status(SpeechStatus::Idle);
    }

    fn status(&self) -> SpeechStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_factors() {
        assert_eq!(SpeechRate::Slow.factor(), 0.8);
        assert_eq!(SpeechRate::Normal.factor(), 1.0);
        assert_eq!(SpeechRate::Fast.factor(), 1.2);
    }

    #[tokio::test]
    async fn test_null_service_status_transitions() {
        let service = NullSpeechService::new();
        assert_eq!(service.status(), SpeechStatus::Idle);

        service.speak("texto", SpeechRate::Normal).await;
        assert_eq!(service.status(), SpeechStatus::Idle);

        // Pause only applies while speaking.
        service.pause();
        assert_eq!(service.status(), SpeechStatus::Idle);

        service.cancel();
        assert_eq!(service.status(), SpeechStatus::Idle);
    }
}
