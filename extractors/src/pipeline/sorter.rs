use shared_types::ContactRecord;

/// Stable ascending sort by lowercase email.
pub fn sort_by_email(records: &mut [ContactRecord]) {
    records.sort_by_cached_key(ContactRecord::key);
}

/// The two output sets of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiftResult {
    pub valid: Vec<ContactRecord>,
    pub suspicious: Vec<ContactRecord>,
}

impl SiftResult {
    pub fn sorted(mut self) -> Self {
        sort_by_email(&mut self.valid);
        sort_by_email(&mut self.suspicious);
        self
    }

    pub fn total(&self) -> usize {
        self.valid.len() + self.suspicious.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
