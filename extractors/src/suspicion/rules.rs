//! One pure predicate per suspicion rule. Each takes the local part and/or
//! domain of an address plus its own thresholds.

use super::thresholds::{
    DigitRatioThresholds, DomainThresholds, LongLocalPartThresholds, MarkerThresholds,
    RepeatThresholds,
};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
}

/// R1
pub fn long_random_local_part(local: &str, thresholds: &LongLocalPartThresholds) -> bool {
    if local.chars().count() <= thresholds.min_length {
        return false;
    }

    vowel_ratio(local) < thresholds.max_vowel_ratio
        || irregularity(local) >= thresholds.min_irregularity
}

/// R2
pub fn excessive_digits_or_specials(local: &str, thresholds: &DigitRatioThresholds) -> bool {
    let total = local.chars().count();
    if total < thresholds.min_length {
        return false;
    }

    let non_letters = local.chars().filter(|c| !c.is_alphabetic()).count();
    (non_letters as f64 / total as f64) > thresholds.max_ratio
}

/// R3
pub fn suspicious_domain(domain: &str, thresholds: &DomainThresholds) -> bool {
    let domain = domain.to_lowercase();

    if thresholds
        .tokens
        .iter()
        .any(|token| domain.contains(&token.to_lowercase()))
    {
        return true;
    }

    let hyphens = domain.chars().filter(|c| *c == '-').count();
    let digits = domain.chars().filter(|c| c.is_ascii_digit()).count();
    let longest_label = domain.split('.').map(str::len).max().unwrap_or(0);

    hyphens > thresholds.max_hyphens
        || digits > thresholds.max_digits
        || longest_label > thresholds.max_label_length
}

/// R4
pub fn automated_marker(local: &str, domain: &str, thresholds: &MarkerThresholds) -> bool {
    let local = local.to_lowercase();
    let domain = domain.to_lowercase();

    thresholds.tokens.iter().any(|token| {
        let token = token.to_lowercase();
        local.contains(&token) || domain.contains(&token)
    })
}

/// R5
pub fn repeated_characters(local: &str, thresholds: &RepeatThresholds) -> bool {
    let mut previous = None;
    let mut run = 0;

    for c in local.chars().flat_map(char::to_lowercase) {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }

        if run >= thresholds.min_run {
            return true;
        }
    }

    false
}

/// Share of letters that are vowels. No letters at all counts as zero.
fn vowel_ratio(local: &str) -> f64 {
    let letters: Vec<char> = local
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if letters.is_empty() {
        return 0.0;
    }

    let vowels = letters.iter().filter(|c| VOWELS.contains(*c)).count();
    vowels as f64 / letters.len() as f64
}

/// Share of adjacent alphanumeric pairs that switch between lowercase,
/// uppercase and digit. Punctuation is skipped.
fn irregularity(local: &str) -> f64 {
    let classes: Vec<CharClass> = local
        .chars()
        .filter_map(|c| {
            if c.is_ascii_digit() {
                Some(CharClass::Digit)
            } else if c.is_uppercase() {
                Some(CharClass::Upper)
            } else if c.is_lowercase() {
                Some(CharClass::Lower)
            } else {
                None
            }
        })
        .collect();

    if classes.len() < 2 {
        return 0.0;
    }

    let switches = classes.windows(2).filter(|pair| pair[0] != pair[1]).count();
    switches as f64 / (classes.len() - 1) as f64
}
