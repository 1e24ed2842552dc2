//! Compound sentiment scoring.
use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores a text between -1 (most negative) and 1 (most positive).
pub trait SentimentScorer {
    fn compound(&self, text: &str) -> f64;
}

/// Lexicon-based VADER scorer.
///
/// Building the analyzer loads the lexicon, so create one per fetch and reuse
/// it for every post.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        clamp_score(scores.get("compound").copied().unwrap_or(0.0))
    }
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_follows_the_text() {
        let scorer = VaderScorer::new();
        assert!(scorer.compound("I love this, it is wonderful and great!") > 0.0);
        assert!(scorer.compound("This is terrible, I hate it. Awful.") < 0.0);
    }

    #[test]
    fn neutral_text_scores_zero() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.compound(""), 0.0);
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_score(1.7), 1.0);
        assert_eq!(clamp_score(-3.0), -1.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(0.25), 0.25);
    }
}
