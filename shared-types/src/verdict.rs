use crate::contact::ContactRecord;
use serde::{Deserialize, Serialize};

/// Identifier of one suspicion heuristic.
///
/// The declaration order is the evaluation order and the order rules are
/// reported in [`Verdict::matched_rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    LongRandomLocalPart,
    ExcessiveDigitsOrSpecials,
    SuspiciousDomain,
    AutomatedMarker,
    RepeatedCharacters,
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::LongRandomLocalPart,
        RuleId::ExcessiveDigitsOrSpecials,
        RuleId::SuspiciousDomain,
        RuleId::AutomatedMarker,
        RuleId::RepeatedCharacters,
    ];

    /// Short code (`R1`..`R5`) used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            RuleId::LongRandomLocalPart => "R1",
            RuleId::ExcessiveDigitsOrSpecials => "R2",
            RuleId::SuspiciousDomain => "R3",
            RuleId::AutomatedMarker => "R4",
            RuleId::RepeatedCharacters => "R5",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RuleId::LongRandomLocalPart => "long random-looking local part",
            RuleId::ExcessiveDigitsOrSpecials => "too many digits or special characters",
            RuleId::SuspiciousDomain => "throwaway or irregular domain",
            RuleId::AutomatedMarker => "automated or unsubscribe address",
            RuleId::RepeatedCharacters => "repeated character run",
        };
        write!(f, "{} ({})", self.code(), reason)
    }
}

/// Classification outcome for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub record: ContactRecord,
    pub matched_rules: Vec<RuleId>,
}

impl Verdict {
    pub fn is_suspicious(&self) -> bool {
        !self.matched_rules.is_empty()
    }

    pub fn matched(&self, rule: RuleId) -> bool {
        self.matched_rules.contains(&rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_without_rules_is_valid() {
        let verdict = Verdict {
            record: ContactRecord::new("John", "Doe", "john@example.com"),
            matched_rules: vec![],
        };
        assert!(!verdict.is_suspicious());
    }

    #[test]
    fn test_verdict_reports_matched_rules() {
        let verdict = Verdict {
            record: ContactRecord::new("", "", "noreply@example.com"),
            matched_rules: vec![RuleId::AutomatedMarker],
        };
        assert!(verdict.is_suspicious());
        assert!(verdict.matched(RuleId::AutomatedMarker));
        assert!(!verdict.matched(RuleId::SuspiciousDomain));
    }

    #[test]
    fn test_rule_order_is_declaration_order() {
        let mut sorted = RuleId::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, RuleId::ALL.to_vec());
        assert_eq!(RuleId::ALL[0].code(), "R1");
        assert_eq!(RuleId::ALL[4].code(), "R5");
    }

    #[test]
    fn test_display_includes_code() {
        assert!(RuleId::SuspiciousDomain.to_string().starts_with("R3"));
    }
}
