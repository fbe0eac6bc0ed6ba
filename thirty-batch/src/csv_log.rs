//! Append-only CSV log of playout results
//!
//! Level 4 - Utilities

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use thirty_core::ResultRecord;

use crate::error::BatchError;

/// Header written before every batch
pub const CSV_HEADER: &str = "turns,isDraw,winner";

/// Render a header line followed by one row per record
pub fn format_rows(records: &[ResultRecord]) -> String {
    let mut content = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 12);
    content.push_str(CSV_HEADER);
    content.push('\n');

    for record in records {
        content.push_str(&format!(
            "{},{},{}\n",
            record.turns,
            record.is_draw(),
            record.winner_tag()
        ));
    }

    content
}

/// Append a batch to `path`, creating the file if needed
pub fn append(path: &Path, records: &[ResultRecord]) -> Result<(), BatchError> {
    let to_error = |source| BatchError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    file.write_all(format_rows(records).as_bytes()).map_err(to_error)?;

    tracing::info!("Appended {} results to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirty_core::Outcome;

    fn records() -> Vec<ResultRecord> {
        vec![
            ResultRecord { turns: 12, outcome: Outcome::Winner('B') },
            ResultRecord { turns: 40, outcome: Outcome::Draw },
        ]
    }

    #[test]
    fn test_format_rows() {
        assert_eq!(
            format_rows(&records()),
            "turns,isDraw,winner\n12,false,B\n40,true,*\n"
        );
    }

    #[test]
    fn test_format_rows_empty_batch() {
        assert_eq!(format_rows(&[]), "turns,isDraw,winner\n");
    }

    #[test]
    fn test_append_keeps_previous_batches() {
        let path = std::env::temp_dir().join(format!("thirty-csv-append-{}.csv", std::process::id()));
        std::fs::remove_file(&path).ok();

        append(&path, &records()).unwrap();
        append(&path, &records()[..1]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            content,
            "turns,isDraw,winner\n12,false,B\n40,true,*\nturns,isDraw,winner\n12,false,B\n"
        );
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let path = Path::new("/no/such/dir/results.csv");
        let err = append(path, &records()).unwrap_err();
        assert!(matches!(err, BatchError::CsvWrite { .. }));
    }
}
