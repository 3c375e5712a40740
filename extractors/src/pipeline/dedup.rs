use serde::Deserialize;
use shared_types::ContactRecord;
use std::collections::HashMap;

/// What happens when an email that is already held shows up again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamePolicy {
    /// The first record is kept verbatim.
    #[default]
    FirstWins,
    /// The first record is kept, but its empty name parts are filled from
    /// later records.
    FillEmpty,
}

/// Collects records keyed by lowercase email, keeping the first one seen.
///
/// One accumulator can be fed several documents in turn; feeding them in a
/// fixed order keeps "first occurrence" well defined across files.
#[derive(Debug, Default)]
pub struct ContactAccumulator {
    policy: NamePolicy,
    positions: HashMap<String, usize>,
    records: Vec<ContactRecord>,
}

impl ContactAccumulator {
    pub fn new(policy: NamePolicy) -> Self {
        Self {
            policy,
            positions: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Returns true when `record` introduced a new email.
    pub fn insert(&mut self, record: ContactRecord) -> bool {
        let key = record.key();

        match self.positions.get(&key) {
            Some(&index) => {
                if self.policy == NamePolicy::FillEmpty {
                    let existing = &mut self.records[index];
                    if existing.first_name.is_empty() && !record.first_name.is_empty() {
                        existing.first_name = record.first_name;
                    }
                    if existing.last_name.is_empty() && !record.last_name.is_empty() {
                        existing.last_name = record.last_name;
                    }
                }
                false
            }
            None => {
                self.positions.insert(key, self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    /// Inserts every record and returns how many were new.
    pub fn extend(&mut self, records: impl IntoIterator<Item = ContactRecord>) -> usize {
        records
            .into_iter()
            .map(|record| self.insert(record))
            .filter(|added| *added)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Unique records in first-seen order.
    pub fn into_records(self) -> Vec<ContactRecord> {
        self.records
    }
}

/// First-occurrence-wins deduplication of one sequence.
pub fn deduplicate(records: impl IntoIterator<Item = ContactRecord>) -> Vec<ContactRecord> {
    let mut accumulator = ContactAccumulator::new(NamePolicy::FirstWins);
    accumulator.extend(records);
    accumulator.into_records()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let records = vec![
            ContactRecord::new("A", "B", "a@b.com"),
            ContactRecord::new("C", "D", "a@b.com"),
        ];

        assert_eq!(deduplicate(records), vec![ContactRecord::new("A", "B", "a@b.com")]);
    }

    #[test]
    fn test_case_insensitive_key_keeps_first_casing() {
        let records = vec![
            ContactRecord::new("", "", "John@Example.com"),
            ContactRecord::new("John", "Doe", "john@example.com"),
        ];

        let unique = deduplicate(records);
        assert_eq!(unique, vec![ContactRecord::new("", "", "John@Example.com")]);
    }

    #[test]
    fn test_richer_later_record_does_not_merge_by_default() {
        let mut accumulator = ContactAccumulator::default();
        assert!(accumulator.insert(ContactRecord::new("Jane", "", "jane@x.com")));
        assert!(!accumulator.insert(ContactRecord::new("Janet", "Smith", "JANE@x.com")));

        assert_eq!(
            accumulator.records(),
            &[ContactRecord::new("Jane", "", "jane@x.com")]
        );
    }

    #[test]
    fn test_fill_empty_policy() {
        let mut accumulator = ContactAccumulator::new(NamePolicy::FillEmpty);
        accumulator.insert(ContactRecord::new("Jane", "", "jane@x.com"));
        accumulator.insert(ContactRecord::new("Janet", "Smith", "JANE@x.com"));

        assert_eq!(
            accumulator.into_records(),
            vec![ContactRecord::new("Jane", "Smith", "jane@x.com")]
        );
    }

    #[test]
    fn test_extend_counts_new_records_across_batches() {
        let mut accumulator = ContactAccumulator::default();

        let first = accumulator.extend(vec![
            ContactRecord::new("", "", "a@x.com"),
            ContactRecord::new("", "", "b@x.com"),
        ]);
        let second = accumulator.extend(vec![
            ContactRecord::new("", "", "B@x.com"),
            ContactRecord::new("", "", "c@x.com"),
        ]);

        assert_eq!(first, 2);
        assert_eq!(second, 1);
        assert_eq!(accumulator.len(), 3);
    }

    #[test]
    fn test_policy_names() {
        let policy: NamePolicy = serde_json::from_str("\"fill-empty\"").unwrap();
        assert_eq!(policy, NamePolicy::FillEmpty);
        assert_eq!(NamePolicy::default(), NamePolicy::FirstWins);
    }
}
