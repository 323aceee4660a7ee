//! Heuristic password strength scoring.
//!
//! The score is a rough 0–4 scale built from length, character-set entropy,
//! character variety and a penalty per detected weak pattern. It is a UI aid,
//! not a guarantee.

use std::fmt;

use serde::Serialize;

const COMMON_WORDS: [&str; 5] = ["password", "admin", "user", "qwerty", "123456"];
const KEYBOARD_ROWS: [&str; 3] = ["qwerty", "asdfgh", "zxcvbn"];

/// A weak pattern found in a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Pattern {
    /// A run of 3+ digits counting up by one, e.g. `345`
    SequentialDigits(String),
    /// Every run of 3+ identical characters, e.g. `["aaa", "111"]`
    RepeatedCharacters(Vec<String>),
    CommonWord(&'static str),
    KeyboardRow(&'static str),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::SequentialDigits(run) => write!(f, "Sequential numbers: {}", run),
            Pattern::RepeatedCharacters(runs) => {
                write!(f, "Repeated characters: {}", runs.join(", "))
            }
            Pattern::CommonWord(word) => write!(f, "Common word: {}", word),
            Pattern::KeyboardRow(row) => write!(f, "Keyboard pattern: {}", row),
        }
    }
}

/// Strength bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_score(score: f32) -> Self {
        if score >= 3.5 {
            StrengthLevel::VeryStrong
        } else if score >= 2.5 {
            StrengthLevel::Strong
        } else if score >= 1.5 {
            StrengthLevel::Moderate
        } else if score >= 0.5 {
            StrengthLevel::Weak
        } else {
            StrengthLevel::VeryWeak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Moderate => "Moderate",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of feedback on a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Feedback {
    Good(String),
    Warning(String),
}

/// Full result of [`analyze`].
#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    /// 0.0 to 4.0 in half steps
    pub score: f32,
    pub level: StrengthLevel,
    pub entropy_bits: f64,
    pub patterns: Vec<Pattern>,
    pub feedback: Vec<Feedback>,
    pub length: usize,
}

struct CharClasses {
    lower: bool,
    upper: bool,
    digit: bool,
    symbol: bool,
}

impl CharClasses {
    fn of(password: &str) -> Self {
        Self {
            lower: password.chars().any(|c| c.is_ascii_lowercase()),
            upper: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    fn count(&self) -> usize {
        [self.lower, self.upper, self.digit, self.symbol]
            .iter()
            .filter(|&&present| present)
            .count()
    }

    fn charset_size(&self) -> u32 {
        let mut size = 0;
        if self.lower {
            size += 26;
        }
        if self.upper {
            size += 26;
        }
        if self.digit {
            size += 10;
        }
        if self.symbol {
            size += 33;
        }
        size
    }
}

/// Estimated entropy in bits: `length * log2(charset size)`.
pub fn entropy_bits(password: &str) -> f64 {
    let charset = CharClasses::of(password).charset_size();
    if charset == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * f64::from(charset).log2()
}

/// Split `s` into maximal runs of characters satisfying `same`.
fn runs<F>(s: &str, same: F) -> Vec<String>
where
    F: Fn(char, char) -> bool,
{
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in s.chars() {
        match prev {
            Some(p) if same(p, c) => current.push(c),
            _ => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
        }
        prev = Some(c);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn is_ascending_by_one(run: &str) -> bool {
    let digits: Vec<u32> = run.chars().filter_map(|c| c.to_digit(10)).collect();
    digits.windows(2).all(|pair| pair[1] == pair[0] + 1)
}

/// Detect weak patterns.
pub fn detect_patterns(password: &str) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    for run in runs(password, |a, b| a.is_ascii_digit() && b.is_ascii_digit()) {
        let is_digits = run.chars().all(|c| c.is_ascii_digit());
        if is_digits && run.len() >= 3 && is_ascending_by_one(&run) {
            patterns.push(Pattern::SequentialDigits(run));
        }
    }

    let repeats: Vec<String> = runs(password, |a, b| a == b)
        .into_iter()
        .filter(|run| run.chars().count() >= 3)
        .collect();
    if !repeats.is_empty() {
        patterns.push(Pattern::RepeatedCharacters(repeats));
    }

    let lowered = password.to_lowercase();
    for word in COMMON_WORDS {
        if lowered.contains(word) {
            patterns.push(Pattern::CommonWord(word));
        }
    }
    for row in KEYBOARD_ROWS {
        if lowered.contains(row) {
            patterns.push(Pattern::KeyboardRow(row));
        }
    }

    patterns
}

/// Score a password.
pub fn analyze(password: &str) -> StrengthReport {
    let entropy = entropy_bits(password);
    let patterns = detect_patterns(password);
    let length = password.chars().count();

    let mut score: f32 = 0.0;
    let mut feedback = Vec::new();

    if length < 8 {
        feedback.push(Feedback::Warning(
            "Too short (min 8 characters)".to_string(),
        ));
    } else if length >= 12 {
        score += 1.0;
        feedback.push(Feedback::Good("Good length".to_string()));
    } else {
        score += 0.5;
    }

    if entropy < 28.0 {
        feedback.push(Feedback::Warning("Very weak entropy".to_string()));
    } else if entropy < 36.0 {
        score += 0.5;
        feedback.push(Feedback::Warning("Weak entropy".to_string()));
    } else if entropy < 60.0 {
        score += 1.0;
        feedback.push(Feedback::Good("Moderate entropy".to_string()));
    } else {
        score += 2.0;
        feedback.push(Feedback::Good("Strong entropy".to_string()));
    }

    match CharClasses::of(password).count() {
        4 => {
            score += 1.0;
            feedback.push(Feedback::Good("Excellent character variety".to_string()));
        }
        3 => {
            score += 0.5;
            feedback.push(Feedback::Good("Good character variety".to_string()));
        }
        _ => feedback.push(Feedback::Warning("Limited character variety".to_string())),
    }

    if !patterns.is_empty() {
        score -= patterns.len() as f32 * 0.5;
        feedback.push(Feedback::Warning(format!(
            "{} pattern(s) detected",
            patterns.len()
        )));
    }

    let score = score.clamp(0.0, 4.0);
    StrengthReport {
        score,
        level: StrengthLevel::from_score(score),
        entropy_bits: entropy,
        patterns,
        feedback,
        length,
    }
}

/// Coarse label for a generated password's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SecurityLevel {
    /// Buckets: 1–7 low, 8–14 medium, 15–21 high, 22–30 very high.
    pub fn for_length(length: usize) -> Option<Self> {
        match length {
            1..=7 => Some(SecurityLevel::Low),
            8..=14 => Some(SecurityLevel::Medium),
            15..=21 => Some(SecurityLevel::High),
            22..=30 => Some(SecurityLevel::VeryHigh),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SecurityLevel::Low => "Low",
            SecurityLevel::Medium => "Medium",
            SecurityLevel::High => "High",
            SecurityLevel::VeryHigh => "Very high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy() {
        assert_eq!(entropy_bits(""), 0.0);
        let expected = 8.0 * 26f64.log2();
        assert!((entropy_bits("abcdefgh") - expected).abs() < 1e-9);
        let mixed = 4.0 * 95f64.log2();
        assert!((entropy_bits("aB3!") - mixed).abs() < 1e-9);
    }

    #[test]
    fn test_sequential_digits() {
        let patterns = detect_patterns("abc1234x");
        assert!(patterns.contains(&Pattern::SequentialDigits("1234".to_string())));
        // A longer run that is not strictly ascending does not count
        assert!(detect_patterns("9123").is_empty());
        assert!(detect_patterns("12").is_empty());
    }

    #[test]
    fn test_repeated_characters_collected_together() {
        let patterns = detect_patterns("aaab111c");
        assert_eq!(
            patterns,
            vec![Pattern::RepeatedCharacters(vec![
                "aaa".to_string(),
                "111".to_string()
            ])]
        );
        assert_eq!(
            patterns[0].to_string(),
            "Repeated characters: aaa, 111"
        );
    }

    #[test]
    fn test_common_word_and_keyboard_row() {
        let patterns = detect_patterns("MyQwertyPass");
        assert!(patterns.contains(&Pattern::CommonWord("qwerty")));
        assert!(patterns.contains(&Pattern::KeyboardRow("qwerty")));
    }

    #[test]
    fn test_short_password_very_weak() {
        let report = analyze("abc");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.level, StrengthLevel::VeryWeak);
        assert!(report
            .feedback
            .contains(&Feedback::Warning("Too short (min 8 characters)".to_string())));
    }

    #[test]
    fn test_dictionary_password_weak() {
        let report = analyze("password");
        assert_eq!(report.score, 1.0);
        assert_eq!(report.level, StrengthLevel::Weak);
        assert_eq!(report.patterns, vec![Pattern::CommonWord("password")]);
    }

    #[test]
    fn test_strong_random_password() {
        let report = analyze("Tr0ub4dor&3xYz!9");
        assert_eq!(report.score, 4.0);
        assert_eq!(report.level, StrengthLevel::VeryStrong);
        assert!(report.patterns.is_empty());
        assert_eq!(report.length, 16);
    }

    #[test]
    fn test_score_never_negative() {
        let report = analyze("111");
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_security_level_for_length() {
        assert_eq!(SecurityLevel::for_length(5), Some(SecurityLevel::Low));
        assert_eq!(SecurityLevel::for_length(8), Some(SecurityLevel::Medium));
        assert_eq!(SecurityLevel::for_length(21), Some(SecurityLevel::High));
        assert_eq!(SecurityLevel::for_length(30), Some(SecurityLevel::VeryHigh));
        assert_eq!(SecurityLevel::for_length(0), None);
        assert_eq!(SecurityLevel::for_length(31), None);
    }
}
