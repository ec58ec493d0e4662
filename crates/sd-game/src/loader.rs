use std::io::Read;
use std::path::Path;

use sd_core::core::{Dataset, DatasetItem, LabelPolicy};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV must contain a `{column}` column")]
    MissingColumn { column: String },
    #[error("no valid rows found after dropping incomplete rows")]
    NoValidRows,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub review_column: String,
    pub sentiment_column: String,
    pub delimiter: u8,
    pub policy: LabelPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            review_column: "review".to_owned(),
            sentiment_column: "sentiment".to_owned(),
            delimiter: b',',
            policy: LabelPolicy::Lenient,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub total_rows: usize,
    pub dropped_rows: usize,
}

pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<LoadedDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let loaded = read_dataset(file, options)?;
    tracing::info!(
        path = %path.display(),
        rows = loaded.dataset.len(),
        dropped = loaded.dropped_rows,
        "loaded dataset"
    );
    Ok(loaded)
}

/// Reads `(review, sentiment)` rows from CSV with a header row.
///
/// Rows with a missing or blank review or sentiment cell are dropped, as
/// are rows the label policy rejects.
pub fn read_dataset<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadedDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let review_idx = column_index(&headers, &options.review_column)?;
    let sentiment_idx = column_index(&headers, &options.sentiment_column)?;

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        let review = record.get(review_idx).unwrap_or_default().trim();
        let sentiment = record.get(sentiment_idx).unwrap_or_default().trim();
        items.push(DatasetItem::new(review, sentiment));
    }

    let total_rows = items.len();
    let dataset = Dataset::with_policy(items, options.policy);
    let dropped_rows = total_rows - dataset.len();
    if dropped_rows > 0 {
        tracing::debug!(dropped = dropped_rows, "dropped incomplete or unlabelled rows");
    }
    if dataset.is_empty() {
        return Err(LoadError::NoValidRows);
    }

    Ok(LoadedDataset {
        dataset,
        total_rows,
        dropped_rows,
    })
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv_text: &str, options: &LoadOptions) -> Result<LoadedDataset, LoadError> {
        read_dataset(csv_text.as_bytes(), options)
    }

    #[test]
    fn test_reads_rows() {
        let loaded = read(
            "review,sentiment\nLoved it,positive\nBroke quickly,1\n",
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(loaded.total_rows, 2);
        assert_eq!(loaded.dropped_rows, 0);
        assert_eq!(loaded.dataset.get(0).unwrap().review(), "Loved it");
        assert_eq!(loaded.dataset.get(1).unwrap().sentiment(), "1");
    }

    #[test]
    fn test_extra_columns_and_order() {
        let loaded = read(
            "id,sentiment,review\n1,neg,\"Cold, bland food\"\n",
            &LoadOptions::default(),
        )
        .unwrap();
        let item = loaded.dataset.get(0).unwrap();
        assert_eq!(item.review(), "Cold, bland food");
        assert_eq!(item.sentiment(), "neg");
    }

    #[test]
    fn test_drops_incomplete_rows() {
        let loaded = read(
            "review,sentiment\nGood,pos\n,neg\nNo label,\nShort row\n",
            &LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(loaded.total_rows, 4);
        assert_eq!(loaded.dropped_rows, 3);
        assert_eq!(loaded.dataset.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let err = read("text,sentiment\nhello,pos\n", &LoadOptions::default()).unwrap_err();
        match err {
            LoadError::MissingColumn { column } => assert_eq!(column, "review"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_no_valid_rows() {
        let err = read("review,sentiment\n,\n  ,  \n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoValidRows));
        assert_eq!(
            err.to_string(),
            "no valid rows found after dropping incomplete rows"
        );
    }

    #[test]
    fn test_header_only() {
        let err = read("review,sentiment\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoValidRows));
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let options = LoadOptions {
            review_column: "text".to_owned(),
            sentiment_column: "stars".to_owned(),
            delimiter: b';',
            ..LoadOptions::default()
        };
        let loaded = read("text;stars\nFine;3\nSuperb;5\n", &options).unwrap();
        assert_eq!(loaded.dataset.len(), 2);
    }

    #[test]
    fn test_strict_policy_drops_unrecognized_labels() {
        let options = LoadOptions {
            policy: LabelPolicy::Strict,
            ..LoadOptions::default()
        };
        let loaded = read("review,sentiment\nGood,pos\nHmm,mixed\n", &options).unwrap();
        assert_eq!(loaded.dataset.len(), 1);
        assert_eq!(loaded.dropped_rows, 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(
            Path::new("/definitely/not/here.csv"),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
