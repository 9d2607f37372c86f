use tts::Tts;

use crate::types::phrase_data::Phrase;

/// A single playback request, fully resolved from a phrase plus the
/// configured defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceRequest {
    pub text: String,
    pub lang: String,
    /// Relative to the engine's normal speaking rate (1.0 = normal).
    pub rate: f32,
}

/// Build the request for a phrase: the explicit speech override wins over
/// the display text, and missing lang/rate fall back to the configured
/// defaults.
pub fn utterance_for(phrase: &Phrase, default_lang: &str, default_rate: f32) -> UtteranceRequest {
    UtteranceRequest {
        text: phrase
            .speech
            .clone()
            .unwrap_or_else(|| phrase.greek.clone()),
        lang: phrase
            .lang
            .clone()
            .unwrap_or_else(|| default_lang.to_string()),
        rate: phrase.rate.unwrap_or(default_rate),
    }
}

/// Choose a voice index for a requested language tag: first a voice whose
/// tag starts with the full request, then one matching its primary
/// subtag, then any voice mentioning the fallback code. `None` leaves the
/// engine's default voice in place.
pub fn pick_voice(languages: &[String], requested: &str, fallback: &str) -> Option<usize> {
    let requested = requested.to_lowercase();
    let fallback = fallback.to_lowercase();
    let primary = requested
        .split('-')
        .next()
        .unwrap_or(requested.as_str())
        .to_string();

    let lowered: Vec<String> = languages.iter().map(|l| l.to_lowercase()).collect();
    lowered
        .iter()
        .position(|l| l.starts_with(&requested))
        .or_else(|| lowered.iter().position(|l| l.starts_with(&primary)))
        .or_else(|| lowered.iter().position(|l| !fallback.is_empty() && l.contains(&fallback)))
}

/// What the app needs from a speech engine. Kept narrow so the catalog
/// and UI logic can be exercised with a recording stand-in.
pub trait UtterancePlayer {
    /// Start speaking, cancelling any utterance already in flight.
    fn speak(&mut self, request: &UtteranceRequest) -> Result<(), String>;
    fn stop(&mut self);
    fn is_speaking(&self) -> bool;
}

/// Platform speech synthesis via the `tts` crate. Construction probes the
/// engine once; a failure here means the whole feature is absent and the
/// app degrades to a static advisory.
pub struct TtsPlayer {
    tts: Tts,
    fallback_code: String,
}

impl TtsPlayer {
    pub fn initialize(fallback_code: &str) -> Result<Self, String> {
        let tts = Tts::default().map_err(|e| format!("speech engine unavailable: {}", e))?;
        Ok(TtsPlayer {
            tts,
            fallback_code: fallback_code.to_lowercase(),
        })
    }

    fn apply_voice(&mut self, request: &UtteranceRequest) {
        let voices = match self.tts.voices() {
            Ok(voices) => voices,
            Err(e) => {
                tracing::warn!("could not list voices: {}", e);
                return;
            }
        };
        let languages: Vec<String> = voices
            .iter()
            .map(|voice| voice.language().to_string())
            .collect();
        if let Some(index) = pick_voice(&languages, &request.lang, &self.fallback_code) {
            if let Err(e) = self.tts.set_voice(&voices[index]) {
                tracing::warn!("could not set voice: {}", e);
            }
        } else {
            tracing::debug!(lang = %request.lang, "no matching voice, keeping engine default");
        }
    }

    fn apply_rate(&mut self, request: &UtteranceRequest) {
        let scaled = (self.tts.normal_rate() * request.rate)
            .clamp(self.tts.min_rate(), self.tts.max_rate());
        if let Err(e) = self.tts.set_rate(scaled) {
            tracing::warn!("could not set speaking rate: {}", e);
        }
    }
}

impl UtterancePlayer for TtsPlayer {
    fn speak(&mut self, request: &UtteranceRequest) -> Result<(), String> {
        self.apply_voice(request);
        self.apply_rate(request);
        self.tts
            .speak(request.text.clone(), true)
            .map(|_| ())
            .map_err(|e| format!("failed to speak: {}", e))
    }

    fn stop(&mut self) {
        if let Err(e) = self.tts.stop() {
            tracing::warn!("could not stop utterance: {}", e);
        }
    }

    fn is_speaking(&self) -> bool {
        self.tts.is_speaking().unwrap_or(false)
    }
}
