//! Lexicon scorer for market-chatter sentiment.

/// Word weights for market chatter.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("bullish", 0.6),
    ("rally", 0.5),
    ("surge", 0.5),
    ("soar", 0.5),
    ("soaring", 0.5),
    ("breakout", 0.5),
    ("gain", 0.4),
    ("gains", 0.4),
    ("profit", 0.4),
    ("profits", 0.4),
    ("upside", 0.4),
    ("strong", 0.4),
    ("momentum", 0.3),
    ("green", 0.3),
    ("buy", 0.3),
    ("opportunity", 0.3),
    ("record", 0.3),
    ("win", 0.4),
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("love", 0.5),
    ("best", 0.5),
    // Negative signals
    ("bearish", -0.6),
    ("crash", -0.7),
    ("plunge", -0.6),
    ("slump", -0.5),
    ("selloff", -0.5),
    ("dump", -0.5),
    ("loss", -0.4),
    ("losses", -0.4),
    ("fear", -0.5),
    ("panic", -0.6),
    ("weak", -0.4),
    ("red", -0.3),
    ("correction", -0.3),
    ("fraud", -0.7),
    ("scam", -0.7),
    ("warning", -0.4),
    ("risk", -0.3),
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("down", -0.3),
];

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}
