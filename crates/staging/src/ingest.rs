//! CSV ingestion
//!
//! Reads the three input files into their record types. Errors carry the
//! file name and the 1-based line number (the header is line 1).

use customernexus_core::{CustomerRecord, Error, PurchaseRecord, Result, ResultExt, TransferRecord};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const TRANSFERS_FILE: &str = "transfers.csv";
pub const PURCHASES_FILE: &str = "purchases.csv";

/// Locations of the three input files
#[derive(Debug, Clone)]
pub struct InputFiles {
    pub customers: PathBuf,
    pub transfers: PathBuf,
    pub purchases: PathBuf,
}

impl InputFiles {
    /// The conventional file names inside one directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            customers: dir.join(CUSTOMERS_FILE),
            transfers: dir.join(TRANSFERS_FILE),
            purchases: dir.join(PURCHASES_FILE),
        }
    }
}

/// Raw rows of all three files
#[derive(Debug, Clone, Default)]
pub struct RawData {
    pub customers: Vec<CustomerRecord>,
    pub transfers: Vec<TransferRecord>,
    pub purchases: Vec<PurchaseRecord>,
}

impl RawData {
    pub fn read(files: &InputFiles) -> Result<Self> {
        let customers = read_records(&files.customers)?;
        let transfers = read_records(&files.transfers)?;
        let purchases = read_records(&files.purchases)?;

        info!(
            "Read {} customers, {} transfers, {} purchases",
            customers.len(),
            transfers.len(),
            purchases.len()
        );

        Ok(Self {
            customers,
            transfers,
            purchases,
        })
    }
}

/// Deserialize every row of a headed CSV file
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path)
        .context(format!("Failed to open CSV file {}", path.display()))?;
    read_records_from(file, &display_name(path))
}

/// Deserialize every row from any reader; `source` names it in errors
pub fn read_records_from<R: std::io::Read, T: DeserializeOwned>(
    reader: R,
    source: &str,
) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            Error::csv(source, line, e.to_string())
        })?;
        records.push(record);
    }

    debug!("Read {} rows from {source}", records.len());
    Ok(records)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_transfers() {
        let data = "TransactionID,SenderAccountNumber,ReceiverAccountNumber,Amount,TransferDatetime\n\
                    1,111-1,222-2,100.50,2021-01-01 10:00:00+08:00\n\
                    2,222-2,111-1,75,2021-01-02 11:00:00+08:00\n";
        let rows: Vec<TransferRecord> = read_records_from(data.as_bytes(), "transfers.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sender_account_number, "111-1");
        assert_eq!(rows[1].amount, 75.0);
    }

    #[test]
    fn test_error_names_file_and_line() {
        let data = "TransactionID,SenderAccountNumber,ReceiverAccountNumber,Amount,TransferDatetime\n\
                    1,111-1,222-2,100.50,2021-01-01 10:00:00+08:00\n\
                    x,222-2,111-1,75,2021-01-02 11:00:00+08:00\n";
        let err = read_records_from::<_, TransferRecord>(data.as_bytes(), "transfers.csv")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("transfers.csv"), "{message}");
        assert!(message.contains("line 3"), "{message}");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_records::<CustomerRecord>(Path::new("/nonexistent/customers.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_input_files_in_dir() {
        let files = InputFiles::in_dir(Path::new("/data"));
        assert_eq!(files.customers, PathBuf::from("/data/customers.csv"));
        assert_eq!(files.transfers, PathBuf::from("/data/transfers.csv"));
        assert_eq!(files.purchases, PathBuf::from("/data/purchases.csv"));
    }
}
