use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SpeechSynthesizer;

/// Container formats a recorder may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Webm,
    Mp4,
    Ogg,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
            Self::Ogg => "audio/ogg",
        }
    }
}

/// Pick a recording format: webm if supported, else mp4, else ogg.
///
/// Ogg is returned without consulting `is_supported`.
pub fn preferred_recording_format<F>(is_supported: F) -> AudioFormat
where
    F: Fn(&str) -> bool,
{
    [AudioFormat::Webm, AudioFormat::Mp4]
        .into_iter()
        .find(|f| is_supported(f.mime_type()))
        .unwrap_or(AudioFormat::Ogg)
}

/// A finished recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn new(data: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `data:` URL suitable for an audio element source.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), STANDARD.encode(&self.data))
    }
}

/// Failures reported by speech collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Microphone access was denied. Please check your browser permissions.")]
    PermissionDenied,

    #[error("No microphone was found. Please connect a microphone and try again.")]
    DeviceNotFound,

    #[error("Your microphone is busy or not readable. Please check if another application is using it.")]
    DeviceBusy,

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    #[error("Not recording")]
    NotRecording,

    #[error("{0}")]
    Other(String),
}

/// One recognition result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Provisional text for the segment in progress; superseded by the next event.
    Interim(String),
    /// Settled text for a segment.
    Final(String),
}

/// Accumulates recognized speech.
///
/// Final segments are appended to the committed text exactly as delivered,
/// with no separator added. Interim text is kept apart and only shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptBuffer {
    committed: String,
    interim: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from text the user already typed.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            committed: text.into(),
            interim: String::new(),
        }
    }

    pub fn push(&mut self, event: TranscriptEvent) {
        match event {
            TranscriptEvent::Final(segment) => {
                self.committed.push_str(&segment);
                self.interim.clear();
            }
            TranscriptEvent::Interim(segment) => self.interim = segment,
        }
    }

    pub fn clear_interim(&mut self) {
        self.interim.clear();
    }

    pub fn text(&self) -> &str {
        &self.committed
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Committed text followed by the pending interim text.
    pub fn display(&self) -> String {
        format!("{}{}", self.committed, self.interim)
    }

    pub fn into_text(self) -> String {
        self.committed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAloudState {
    Started,
    Stopped,
}

/// Play/stop toggle for reading a passage aloud.
pub struct ReadAloud<S> {
    synthesizer: S,
}

impl<S: SpeechSynthesizer> ReadAloud<S> {
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer }
    }

    /// Cancel playback if something is being spoken, otherwise start speaking `text`.
    pub fn toggle(&self, text: &str) -> Result<ReadAloudState, SpeechError> {
        if self.synthesizer.is_speaking() {
            self.synthesizer.cancel();
            return Ok(ReadAloudState::Stopped);
        }
        self.synthesizer.speak(text)?;
        Ok(ReadAloudState::Started)
    }

    pub fn is_speaking(&self) -> bool {
        self.synthesizer.is_speaking()
    }

    pub fn into_inner(self) -> S {
        self.synthesizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSynth {
        speaking: AtomicBool,
        spoken: Mutex<Vec<String>>,
    }

    impl SpeechSynthesizer for FakeSynth {
        fn speak(&self, text: &str) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(text.to_string());
            self.speaking.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn cancel(&self) {
            self.speaking.store(false, Ordering::SeqCst);
        }

        fn is_speaking(&self) -> bool {
            self.speaking.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_preferred_format_order() {
        assert_eq!(preferred_recording_format(|_| true), AudioFormat::Webm);
        assert_eq!(
            preferred_recording_format(|m| m == "audio/mp4"),
            AudioFormat::Mp4
        );
        assert_eq!(preferred_recording_format(|_| false), AudioFormat::Ogg);
    }

    #[test]
    fn test_data_url() {
        let clip = AudioClip::new(vec![1u8, 2, 3], AudioFormat::Webm);
        assert_eq!(clip.to_data_url(), "data:audio/webm;base64,AQID");
        assert!(!clip.is_empty());
    }

    #[test]
    fn test_transcript_buffer() {
        let mut buffer = TranscriptBuffer::with_text("Hello");
        buffer.push(TranscriptEvent::Interim(" wor".into()));
        assert_eq!(buffer.display(), "Hello wor");
        assert_eq!(buffer.text(), "Hello");

        buffer.push(TranscriptEvent::Final(" world".into()));
        assert_eq!(buffer.text(), "Hello world");
        assert_eq!(buffer.interim(), "");

        buffer.push(TranscriptEvent::Final("again".into()));
        assert_eq!(buffer.into_text(), "Hello worldagain");
    }

    #[test]
    fn test_read_aloud_toggles() {
        let read = ReadAloud::new(FakeSynth::default());
        assert_eq!(read.toggle("Call me Ishmael.").unwrap(), ReadAloudState::Started);
        assert!(read.is_speaking());
        assert_eq!(read.toggle("Call me Ishmael.").unwrap(), ReadAloudState::Stopped);
        assert!(!read.is_speaking());
        let synth = read.into_inner();
        assert_eq!(synth.spoken.lock().unwrap().len(), 1);
    }
}
