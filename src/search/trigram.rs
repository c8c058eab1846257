use std::collections::HashSet;

/// Character trigrams of a string, case-insensitive, order-independent
fn trigrams(text: &str) -> HashSet<String> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    chars
        .windows(3)
        .map(|window| window.iter().collect())
        .collect()
}

/// Overlap coefficient over the trigram sets of two strings, in [0, 1].
///
/// Strings too short to yield a trigram compare by case-insensitive
/// equality.
pub fn similarity(a: &str, b: &str) -> f64 {
    let ta = trigrams(a);
    let tb = trigrams(b);

    if ta.is_empty() || tb.is_empty() {
        return if a.to_lowercase() == b.to_lowercase() {
            1.0
        } else {
            0.0
        };
    }

    let shared = ta.intersection(&tb).count();
    shared as f64 / ta.len().min(tb.len()) as f64
}
