//! Suspicious-email classification.
//!
//! Each rule is an independent predicate over the address; a record is
//! suspicious when any of them fires. Names are never consulted.

mod rules;
mod thresholds;

pub use rules::{
    automated_marker, excessive_digits_or_specials, long_random_local_part, repeated_characters,
    suspicious_domain,
};
pub use thresholds::{
    DigitRatioThresholds, DomainThresholds, LongLocalPartThresholds, MarkerThresholds,
    RepeatThresholds, SuspicionThresholds,
};

use shared_types::{ContactRecord, ExtractionError, RuleId, Verdict};

pub struct SuspicionClassifier {
    thresholds: SuspicionThresholds,
}

impl SuspicionClassifier {
    pub fn new(thresholds: SuspicionThresholds) -> Result<Self, ExtractionError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn with_defaults() -> Self {
        Self {
            thresholds: SuspicionThresholds::default(),
        }
    }

    pub fn rule_fires(&self, rule: RuleId, email: &str) -> bool {
        let (local, domain) = email.split_once('@').unwrap_or((email, ""));
        let t = &self.thresholds;

        match rule {
            RuleId::LongRandomLocalPart => long_random_local_part(local, &t.long_local_part),
            RuleId::ExcessiveDigitsOrSpecials => {
                excessive_digits_or_specials(local, &t.digits_and_specials)
            }
            RuleId::SuspiciousDomain => suspicious_domain(domain, &t.suspicious_domain),
            RuleId::AutomatedMarker => automated_marker(local, domain, &t.automated_markers),
            RuleId::RepeatedCharacters => repeated_characters(local, &t.repeated_characters),
        }
    }

    /// Rules that fire for `email`, in R1..R5 order.
    pub fn matched_rules(&self, email: &str) -> Vec<RuleId> {
        RuleId::ALL
            .into_iter()
            .filter(|rule| self.rule_fires(*rule, email))
            .collect()
    }

    pub fn is_suspicious(&self, email: &str) -> bool {
        RuleId::ALL
            .into_iter()
            .any(|rule| self.rule_fires(rule, email))
    }

    pub fn classify(&self, record: ContactRecord) -> Verdict {
        let matched_rules = self.matched_rules(&record.email);

        if !matched_rules.is_empty() {
            let reasons: Vec<String> = matched_rules.iter().map(|r| r.to_string()).collect();
            tracing::debug!("Suspicious {}: {}", record.email, reasons.join(", "));
        }

        Verdict {
            record,
            matched_rules,
        }
    }
}

impl Default for SuspicionClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(email: &str) -> Verdict {
        SuspicionClassifier::with_defaults().classify(ContactRecord::new("", "", email))
    }

    #[test]
    fn test_ordinary_addresses_are_valid() {
        for email in [
            "john@example.com",
            "jane.smith@company.com",
            "info@test.org",
            "Bob.Jones+news@mail.example.org",
            "jonathan.richardson@consulting-group.co.uk",
            "jrsmith1985@gmail.com",
        ] {
            let v = verdict(email);
            assert!(!v.is_suspicious(), "{email} matched {:?}", v.matched_rules);
        }
    }

    #[test]
    fn test_noisy_local_part_on_temp_domain() {
        let v = verdict("xk29fh72jakl93@mailtemp.biz");

        assert!(v.is_suspicious());
        assert!(v.matched(RuleId::LongRandomLocalPart));
        assert!(v.matched(RuleId::SuspiciousDomain));
        assert_eq!(
            v.matched_rules,
            vec![RuleId::LongRandomLocalPart, RuleId::SuspiciousDomain]
        );
    }

    #[test]
    fn test_matched_rules_follow_fixed_order() {
        let v = verdict("noreply0000@bounce-x-y-z.com");

        assert_eq!(
            v.matched_rules,
            vec![
                RuleId::SuspiciousDomain,
                RuleId::AutomatedMarker,
                RuleId::RepeatedCharacters,
            ]
        );
    }

    #[test]
    fn test_classify_keeps_record_untouched() {
        let record = ContactRecord::new("No", "Reply", "NoReply@Example.com");
        let v = SuspicionClassifier::with_defaults().classify(record.clone());

        assert_eq!(v.record, record);
        assert_eq!(v.matched_rules, vec![RuleId::AutomatedMarker]);
    }

    #[test]
    fn test_names_are_not_consulted() {
        let classifier = SuspicionClassifier::with_defaults();
        let plain = classifier.classify(ContactRecord::new("", "", "john@example.com"));
        let named =
            classifier.classify(ContactRecord::new("noreply", "aaaaaa", "john@example.com"));

        assert_eq!(plain.matched_rules, named.matched_rules);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = SuspicionClassifier::with_defaults();
        let first = classifier.classify(ContactRecord::new("", "", "xk29fh72jakl93@mailtemp.biz"));
        let second = classifier.classify(first.record.clone());

        assert_eq!(first, second);
    }

    #[test]
    fn test_is_suspicious_agrees_with_matched_rules() {
        let classifier = SuspicionClassifier::with_defaults();
        for email in ["a@b.com", "aaaa@b.com", "x@mailinator.com", "1234567@x.com"] {
            assert_eq!(
                classifier.is_suspicious(email),
                !classifier.matched_rules(email).is_empty()
            );
        }
    }

    #[test]
    fn test_tuning_one_rule_leaves_others_alone() {
        let mut thresholds = SuspicionThresholds::default();
        thresholds.repeated_characters.min_run = 6;
        let tuned = SuspicionClassifier::new(thresholds).unwrap();
        let default = SuspicionClassifier::with_defaults();

        // Near the R5 boundary: verdict changes.
        assert!(default.is_suspicious("baaaab@example.com"));
        assert!(!tuned.is_suspicious("baaaab@example.com"));

        // Elsewhere: unchanged.
        for email in ["noreply@example.com", "xk29fh72jakl93@mailtemp.biz", "john@example.com"] {
            assert_eq!(default.matched_rules(email), tuned.matched_rules(email));
        }
    }

    #[test]
    fn test_invalid_thresholds_are_rejected() {
        let mut thresholds = SuspicionThresholds::default();
        thresholds.long_local_part.max_vowel_ratio = -0.1;
        assert!(SuspicionClassifier::new(thresholds).is_err());
    }
}
