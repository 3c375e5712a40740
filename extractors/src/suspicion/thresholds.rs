use serde::Deserialize;
use shared_types::ExtractionError;

/// Tunable limits for every suspicion rule. Each field group maps to one
/// `[rules.*]` table in the config file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SuspicionThresholds {
    pub long_local_part: LongLocalPartThresholds,
    pub digits_and_specials: DigitRatioThresholds,
    pub suspicious_domain: DomainThresholds,
    pub automated_markers: MarkerThresholds,
    pub repeated_characters: RepeatThresholds,
}

/// R1: fires when the local part is longer than `min_length` and either has
/// too few vowels or switches character class too often.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LongLocalPartThresholds {
    pub min_length: usize,
    pub max_vowel_ratio: f64,
    pub min_irregularity: f64,
}

impl Default for LongLocalPartThresholds {
    fn default() -> Self {
        Self {
            min_length: 12,
            max_vowel_ratio: 0.2,
            min_irregularity: 0.35,
        }
    }
}

/// R2: fires when more than `max_ratio` of a local part of at least
/// `min_length` characters is digits or punctuation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DigitRatioThresholds {
    pub min_length: usize,
    pub max_ratio: f64,
}

impl Default for DigitRatioThresholds {
    fn default() -> Self {
        Self {
            min_length: 4,
            max_ratio: 0.5,
        }
    }
}

/// R3
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DomainThresholds {
    pub tokens: Vec<String>,
    pub max_hyphens: usize,
    pub max_digits: usize,
    pub max_label_length: usize,
}

impl Default for DomainThresholds {
    fn default() -> Self {
        Self {
            tokens: [
                "mailinator",
                "tempmail",
                "mailtemp",
                "temp-mail",
                "guerrillamail",
                "10minutemail",
                "yopmail",
                "trashmail",
                "throwaway",
                "sharklasers",
                "dispostable",
                "fakeinbox",
                "getnada",
                "maildrop",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_hyphens: 2,
            max_digits: 4,
            max_label_length: 24,
        }
    }
}

/// R4
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerThresholds {
    pub tokens: Vec<String>,
}

impl Default for MarkerThresholds {
    fn default() -> Self {
        Self {
            tokens: [
                "noreply",
                "no-reply",
                "no_reply",
                "donotreply",
                "do-not-reply",
                "unsubscribe",
                "optout",
                "opt-out",
                "bounce",
                "mailer-daemon",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// R5
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepeatThresholds {
    pub min_run: usize,
}

impl Default for RepeatThresholds {
    fn default() -> Self {
        Self { min_run: 4 }
    }
}

impl SuspicionThresholds {
    pub fn validate(&self) -> Result<(), ExtractionError> {
        check_ratio("long_local_part.max_vowel_ratio", self.long_local_part.max_vowel_ratio)?;
        check_ratio("long_local_part.min_irregularity", self.long_local_part.min_irregularity)?;
        check_ratio("digits_and_specials.max_ratio", self.digits_and_specials.max_ratio)?;
        check_positive("long_local_part.min_length", self.long_local_part.min_length)?;
        check_positive("digits_and_specials.min_length", self.digits_and_specials.min_length)?;
        check_positive(
            "suspicious_domain.max_label_length",
            self.suspicious_domain.max_label_length,
        )?;
        check_positive("repeated_characters.min_run", self.repeated_characters.min_run)?;

        let blank_token = self
            .suspicious_domain
            .tokens
            .iter()
            .chain(self.automated_markers.tokens.iter())
            .any(|token| token.trim().is_empty());
        if blank_token {
            return Err(ExtractionError::ConfigError(
                "rule tokens must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_ratio(name: &str, value: f64) -> Result<(), ExtractionError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ExtractionError::ConfigError(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: usize) -> Result<(), ExtractionError> {
    if value == 0 {
        return Err(ExtractionError::ConfigError(format!(
            "{name} must be at least 1"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SuspicionThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_ratio_out_of_range_is_rejected() {
        let mut thresholds = SuspicionThresholds::default();
        thresholds.digits_and_specials.max_ratio = 1.5;

        assert!(matches!(
            thresholds.validate(),
            Err(ExtractionError::ConfigError(_))
        ));
    }

    #[test]
    fn test_zero_run_is_rejected() {
        let mut thresholds = SuspicionThresholds::default();
        thresholds.repeated_characters.min_run = 0;
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let mut thresholds = SuspicionThresholds::default();
        thresholds.automated_markers.tokens.push("  ".to_string());
        assert!(thresholds.validate().is_err());
    }
}
