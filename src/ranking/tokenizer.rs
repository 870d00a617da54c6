//! Title tokenizer.
//!
//! NFC-normalizes and lowercases the text, splits on anything that is not a
//! word character (alphanumeric or `_`), drops single-character tokens and
//! English stop words.

use std::collections::HashSet;
use std::sync::LazyLock;

use unicode_normalization::UnicodeNormalization;

/// The Glasgow-derived English stop-word list used by scikit-learn's
/// `ENGLISH_STOP_WORDS`
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
        "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
        "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
        "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
        "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
        "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
        "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
        "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
        "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
        "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
        "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
        "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
        "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
        "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
        "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
        "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
        "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
        "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
        "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
        "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
        "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
        "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
        "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
        "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
        "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
        "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
        "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize text: normalize, lowercase, split on word boundaries, remove stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text.nfc().collect::<String>().to_lowercase();

    normalized
        .split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().count() > 1)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_title() {
        assert_eq!(tokenize("The Lord of the Rings"), vec!["lord", "rings"]);
    }

    #[test]
    fn test_tokenize_punctuation_and_case() {
        assert_eq!(
            tokenize("Mission: Impossible - Dead Reckoning"),
            vec!["mission", "impossible", "dead", "reckoning"]
        );
        assert_eq!(tokenize("WALL·E"), vec!["wall"]);
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert!(tokenize("A").is_empty());
        assert_eq!(tokenize("Ocean's 11"), vec!["ocean", "11"]);
    }

    #[test]
    fn test_tokenize_non_ascii() {
        assert_eq!(tokenize("Amélie"), vec!["amélie"]);
        // decomposed e + combining acute composes to the same token
        assert_eq!(tokenize("Ame\u{301}lie"), vec!["amélie"]);
        assert_eq!(tokenize("千と千尋の神隠し"), vec!["千と千尋の神隠し"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("the and of").is_empty());
    }

    #[test]
    fn test_full_english_stop_word_list() {
        assert_eq!(tokenize("Back to the Future"), vec!["future"]);
        assert_eq!(tokenize("The Last of Us"), Vec::<String>::new());
        assert_eq!(tokenize("Two Weeks Notice"), vec!["weeks", "notice"]);
        assert_eq!(tokenize("The Truman Show"), vec!["truman"]);
        assert_eq!(tokenize("Top Gun"), vec!["gun"]);
        // not in the list
        assert_eq!(tokenize("Just Doing It"), vec!["just", "doing"]);
    }
}
