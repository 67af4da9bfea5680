/// Lower-case `text` and split it into word tokens.
///
/// Letters, digits and `_` form words; every other character separates them.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_currency() {
        assert_eq!(
            tokenize("Veg Biryani. This is a Veg Rice dish priced at ₹120."),
            vec!["veg", "biryani", "this", "is", "a", "veg", "rice", "dish", "priced", "at", "120"]
        );
    }

    #[test]
    fn keeps_underscores_and_hyphen_splits() {
        assert_eq!(tokenize("Non-Veg snake_case"), vec!["non", "veg", "snake_case"]);
    }

    #[test]
    fn decimal_price_becomes_two_tokens() {
        assert_eq!(tokenize("₹12.5"), vec!["12", "5"]);
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
        assert!(tokenize("...!!").is_empty());
    }
}
