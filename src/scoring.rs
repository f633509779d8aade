use crate::lexicon::ChargedWords;

/// Share of charged lemmas in `words`, as a percentage rounded to 2 decimals.
///
/// An empty article scores 0.0.
pub fn calculate_jaundice_rate<S: AsRef<str>>(words: &[S], charged: &ChargedWords) -> f64 {
    if words.is_empty() {
        return 0.0;
    }

    let found = words
        .iter()
        .filter(|word| charged.contains(word.as_ref()))
        .count();
    let score = found as f64 / words.len() as f64 * 100.0;
    (score * 100.0).round() / 100.0
}
