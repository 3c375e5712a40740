use shared_types::{ContactRecord, RawExtraction};

/// Turns a raw extraction into a record, trimming whitespace but leaving case
/// as found.
pub fn assemble(unit: RawExtraction) -> ContactRecord {
    let (first, last) = unit
        .name_hint
        .map(|hint| (hint.first, hint.last))
        .unwrap_or_default();

    ContactRecord::new(first.trim(), last.trim(), unit.candidate_email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::NameHint;

    #[test]
    fn test_assemble_trims_and_keeps_case() {
        let unit = RawExtraction::new(
            " John.Doe@Example.com ",
            Some(NameHint::new("  John ", " Doe\t")),
        );

        assert_eq!(
            assemble(unit),
            ContactRecord::new("John", "Doe", "John.Doe@Example.com")
        );
    }

    #[test]
    fn test_assemble_without_hint() {
        let unit = RawExtraction::new("info@test.org", None);
        assert_eq!(assemble(unit), ContactRecord::new("", "", "info@test.org"));
    }
}
