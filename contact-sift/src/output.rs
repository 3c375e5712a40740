use anyhow::{Context, Result};
use extractors::SiftResult;
use shared_types::ContactRecord;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 3] = ["First Name", "Last Name", "Email"];

/// Where the two output sets of one run go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub valid: PathBuf,
    pub suspicious: PathBuf,
}

impl OutputPaths {
    pub fn for_stem(output_dir: &Path, stem: &str) -> Self {
        Self {
            valid: output_dir.join(format!("{stem}_emails.csv")),
            suspicious: output_dir.join(format!("{stem}_suspicious.csv")),
        }
    }
}

/// Files actually written for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub valid: PathBuf,
    pub suspicious: Option<PathBuf>,
}

pub fn write_records(path: &Path, records: &[ContactRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([&record.first_name, &record.last_name, &record.email])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Writes `<stem>_emails.csv` always and `<stem>_suspicious.csv` only when
/// there is something suspicious to report. A suspicious file left over from
/// an earlier run is removed so it cannot pass for current output.
pub fn write_result(output_dir: &Path, stem: &str, result: &SiftResult) -> Result<WrittenOutputs> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder {}", output_dir.display()))?;

    let paths = OutputPaths::for_stem(output_dir, stem);

    write_records(&paths.valid, &result.valid)?;
    tracing::info!(
        "Successfully wrote {} email record(s) to '{}'",
        result.valid.len(),
        paths.valid.display()
    );

    let suspicious = if result.suspicious.is_empty() {
        if paths.suspicious.exists() {
            std::fs::remove_file(&paths.suspicious).with_context(|| {
                format!("Failed to remove stale {}", paths.suspicious.display())
            })?;
            tracing::info!("Removed stale '{}'", paths.suspicious.display());
        }
        None
    } else {
        write_records(&paths.suspicious, &result.suspicious)?;
        tracing::info!("Suspicious emails saved to: {}", paths.suspicious.display());
        Some(paths.suspicious)
    };

    Ok(WrittenOutputs {
        valid: paths.valid,
        suspicious,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(path: &Path) -> Vec<ContactRecord> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.deserialize().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::for_stem(Path::new("out"), "contacts");
        assert_eq!(paths.valid, PathBuf::from("out/contacts_emails.csv"));
        assert_eq!(paths.suspicious, PathBuf::from("out/contacts_suspicious.csv"));
    }

    #[test]
    fn test_write_records_round_trips_awkward_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people_emails.csv");
        let records = vec![
            ContactRecord::new("Doe, Jr.", "O\"Brien", "john@example.com"),
            ContactRecord::new("", "", "info@test.org"),
        ];

        write_records(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("First Name,Last Name,Email\n"));
        assert!(text.contains(",,info@test.org\n"));
        assert_eq!(read_back(&path), records);
    }

    #[test]
    fn test_suspicious_file_skipped_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let result = SiftResult {
            valid: vec![ContactRecord::new("John", "Doe", "john@example.com")],
            suspicious: vec![],
        };

        let written = write_result(&out, "contacts", &result).unwrap();

        assert!(written.valid.exists());
        assert!(written.suspicious.is_none());
        assert!(!out.join("contacts_suspicious.csv").exists());
    }

    #[test]
    fn test_rerun_without_suspicious_removes_old_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = SiftResult {
            valid: vec![],
            suspicious: vec![ContactRecord::new("", "", "noreply@example.com")],
        };
        let second = SiftResult {
            valid: vec![ContactRecord::new("John", "Doe", "john@example.com")],
            suspicious: vec![],
        };

        write_result(dir.path(), "list", &first).unwrap();
        assert!(dir.path().join("list_suspicious.csv").exists());

        let written = write_result(dir.path(), "list", &second).unwrap();

        assert!(written.suspicious.is_none());
        assert!(!dir.path().join("list_suspicious.csv").exists());
    }

    #[test]
    fn test_both_files_written() {
        let dir = tempfile::tempdir().unwrap();
        let result = SiftResult {
            valid: vec![],
            suspicious: vec![ContactRecord::new("", "", "noreply@example.com")],
        };

        let written = write_result(dir.path(), "list", &result).unwrap();

        let valid_text = std::fs::read_to_string(&written.valid).unwrap();
        assert_eq!(valid_text, "First Name,Last Name,Email\n");

        let suspicious = written.suspicious.unwrap();
        assert_eq!(
            read_back(&suspicious),
            vec![ContactRecord::new("", "", "noreply@example.com")]
        );
    }
}
