use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use rand::Rng;
use tracing::debug;

use super::AudioClip;

/// Score in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PronunciationScore(u8);

impl PronunciationScore {
    pub const MAX: u8 = 99;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PronunciationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stand-in for a pronunciation assessment service.
///
/// Waits for `delay`, then returns a uniformly random score. The recording is
/// accepted but not inspected.
#[derive(Debug, Clone)]
pub struct PlaceholderAssessor {
    delay: Duration,
}

impl PlaceholderAssessor {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn assess(&self, clip: Option<&AudioClip>) -> PronunciationScore {
        tokio::time::sleep(self.delay).await;
        let score = rand::rng().random_range(0..=PronunciationScore::MAX);
        debug!(
            score,
            clip_bytes = clip.map(|c| c.data.len()).unwrap_or(0),
            "placeholder pronunciation score"
        );
        PronunciationScore(score)
    }
}

impl Default for PlaceholderAssessor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::AudioFormat;
    use std::time::Instant;

    #[test]
    fn test_default_delay() {
        assert_eq!(PlaceholderAssessor::default().delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_assess_without_recording() {
        let score = tokio_test::block_on(PlaceholderAssessor::new(Duration::ZERO).assess(None));
        assert!(score.value() <= 99);
        assert_eq!(score.to_string(), score.value().to_string());
    }

    #[tokio::test]
    async fn test_scores_stay_in_range() {
        let assessor = PlaceholderAssessor::new(Duration::ZERO);
        let clip = AudioClip::new(vec![0u8; 16], AudioFormat::Ogg);
        for _ in 0..200 {
            let score = assessor.assess(Some(&clip)).await;
            assert!(score.value() <= PronunciationScore::MAX);
        }
    }

    #[tokio::test]
    async fn test_scores_vary() {
        let assessor = PlaceholderAssessor::new(Duration::ZERO);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(assessor.assess(None).await.value());
        }
        assert!(seen.len() > 10, "only {} distinct scores", seen.len());
    }

    #[test]
    fn test_assess_future_is_send() {
        fn assert_send<T: Send>(_: T) {}
        let assessor = PlaceholderAssessor::new(Duration::ZERO);
        assert_send(assessor.assess(None));
    }

    #[tokio::test]
    async fn test_waits_for_delay() {
        let assessor = PlaceholderAssessor::new(Duration::from_millis(30));
        let start = Instant::now();
        assessor.assess(None).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
