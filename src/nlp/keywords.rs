//! Frequency-based keyword extraction.

use std::collections::HashMap;

use super::NlpEngine;

impl NlpEngine {
    /// Extract the `top_n` most frequent salient terms from `text`.
    ///
    /// Stopwords are removed first, then each surviving token is stemmed, so
    /// inflected forms of the same word count together. Ranking is by
    /// descending frequency; ties keep first-encountered order, which makes
    /// the result deterministic for a given input.
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        let processed = self.apply_stemming(&self.remove_stopwords(text));

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, token) in processed.split_whitespace().enumerate() {
            let entry = counts.entry(token).or_insert((0, position));
            entry.0 += 1;
        }

        let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(token, _)| token.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> NlpEngine {
        NlpEngine::new("portuguese").unwrap()
    }

    #[test]
    fn most_frequent_token_ranks_first() {
        let text = "sistema sistema sistema suporte suporte urgente";
        let keywords = engine().extract_keywords(text, 5);
        assert_eq!(keywords[0], engine().apply_stemming("sistema"));
    }

    #[test]
    fn never_exceeds_top_n() {
        let text = "alfa beta gama delta epsilon zeta eta teta";
        let keywords = engine().extract_keywords(text, 3);
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn fewer_distinct_tokens_than_top_n_returns_all() {
        let keywords = engine().extract_keywords("suporte suporte", 5);
        assert_eq!(keywords.len(), 1);
    }

    #[test]
    fn ties_preserve_first_encountered_order() {
        // All distinct, all count 1 — order of first appearance must hold.
        let e = engine();
        let keywords = e.extract_keywords("zebra avião manga", 3);
        assert_eq!(
            keywords,
            vec![
                e.apply_stemming("zebra"),
                e.apply_stemming("avião"),
                e.apply_stemming("manga"),
            ]
        );
    }

    #[test]
    fn keywords_come_from_processed_input() {
        let text = "pagamento pagamento fatura";
        let e = engine();
        let processed = e.apply_stemming(&e.remove_stopwords(text));
        let tokens: Vec<&str> = processed.split_whitespace().collect();
        for keyword in e.extract_keywords(text, 5) {
            assert!(tokens.contains(&keyword.as_str()));
        }
    }

    #[test]
    fn stopwords_never_become_keywords() {
        let keywords = engine().extract_keywords("de de de de suporte", 5);
        assert!(!keywords.iter().any(|k| k == "de"));
    }

    #[test]
    fn empty_text_yields_no_keywords() {
        assert!(engine().extract_keywords("", 5).is_empty());
    }
}
