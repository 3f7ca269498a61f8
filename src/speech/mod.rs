//! Speech and audio collaborators.
//!
//! Capture, playback and recognition are platform services; this module only
//! declares the interfaces the application drives them through, plus the
//! small amount of state the application keeps on top of them.
//!
//! Pronunciation scoring is a placeholder: [`PlaceholderAssessor`] waits and
//! returns a random score. It does not listen to the audio.

mod assessment;
mod types;

pub use assessment::{PlaceholderAssessor, PronunciationScore};
pub use types::{
    preferred_recording_format, AudioClip, AudioFormat, ReadAloud, ReadAloudState, SpeechError,
    TranscriptBuffer, TranscriptEvent,
};

use async_trait::async_trait;

/// Microphone capture.
#[async_trait]
pub trait AudioRecorder: Send {
    /// Start capturing in `format`. Capturing again discards the previous clip.
    async fn start(&mut self, format: AudioFormat) -> Result<(), SpeechError>;

    /// Stop capturing and return everything recorded since `start`.
    async fn stop(&mut self) -> Result<AudioClip, SpeechError>;

    fn is_recording(&self) -> bool;
}

/// Text-to-speech playback.
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue `text` for playback and return immediately.
    fn speak(&self, text: &str) -> Result<(), SpeechError>;

    fn cancel(&self);

    fn is_speaking(&self) -> bool;
}

/// Continuous speech recognition with interim results.
#[async_trait]
pub trait SpeechTranscriber: Send {
    async fn start(&mut self) -> Result<(), SpeechError>;

    async fn stop(&mut self) -> Result<(), SpeechError>;

    /// Next recognition event, or `None` once recognition has ended.
    async fn next_event(&mut self) -> Option<TranscriptEvent>;
}

/// Feed transcriber events into `buffer` until recognition ends.
pub async fn drain_transcriber<T>(transcriber: &mut T, buffer: &mut TranscriptBuffer)
where
    T: SpeechTranscriber + ?Sized,
{
    while let Some(event) = transcriber.next_event().await {
        buffer.push(event);
    }
    buffer.clear_interim();
}
