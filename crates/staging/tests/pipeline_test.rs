//! End-to-end staging from CSV files on disk

use customernexus_core::RelationshipType;
use customernexus_staging::geocode::Coordinates;
use customernexus_staging::{prepare_graph_tables, stage_inputs, InputFiles, MockGeocoder};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CUSTOMERS: &str = "\
CIF,AccountNumber,CardNumber,Address,Country,Gender,Age
1001,111-000-001,4000-0000-0001,1 Raffles Place,Singapore,F,34
1002,111-000-002,4000-0000-0002,Unknown Street 7,Malaysia,M,51
";

const TRANSFERS: &str = "\
TransactionID,SenderAccountNumber,ReceiverAccountNumber,Amount,TransferDatetime
1,111-000-001,111-000-002,5200.00,2021-02-01 09:00:00+08:00
2,111-000-002,111-000-001,130.25,2021-02-02 18:15:00+08:00
";

const PURCHASES: &str = "\
TransactionID,CardNumber,Merchant,CardIssuer,PurchaseDatetime,Amount
501,4000-0000-0001,Grab Food,Visa,2021-03-03 12:00:00+08:00,18.90
502,4000-0000-0002,Facebook,Mastercard,2021-03-04 20:00:00+08:00,99.00
";

fn write_inputs(dir: &Path) -> InputFiles {
    fs::write(dir.join("customers.csv"), CUSTOMERS).unwrap();
    fs::write(dir.join("transfers.csv"), TRANSFERS).unwrap();
    fs::write(dir.join("purchases.csv"), PURCHASES).unwrap();
    InputFiles::in_dir(dir)
}

fn geocoder() -> MockGeocoder {
    MockGeocoder::new()
        .with_location("1 Raffles Place", Coordinates::new(1.284, 103.851))
        .with_location("Malaysia", Coordinates::new(4.21, 101.97))
}

#[tokio::test]
async fn test_stage_inputs_normalizes_rows() {
    let dir = TempDir::new().unwrap();
    let files = write_inputs(dir.path());
    let geocoder = geocoder();

    let staged = stage_inputs(&files, &geocoder).await.unwrap();

    assert_eq!(staged.customers.len(), 2);
    assert_eq!(staged.customers[0].account_number, 111000001);
    assert_eq!(staged.customers[1].latitude, 4.21);
    assert_eq!(staged.transfers[0].transfer_epoch, 1_612_141_200);
    assert_eq!(staged.purchases[0].merchant, "Grab_Food");

    // address miss for the second customer falls back to the country
    assert_eq!(
        geocoder.lookups(),
        vec![
            "1 Raffles Place".to_string(),
            "Unknown Street 7".to_string(),
            "Malaysia".to_string()
        ]
    );
}

#[tokio::test]
async fn test_prepare_graph_tables_from_files() {
    let dir = TempDir::new().unwrap();
    let files = write_inputs(dir.path());

    let tables = prepare_graph_tables(&files, &geocoder()).await.unwrap();

    // 2*3 customer nodes + 2 purchases + 2 merchants + 2 issuers + placeholder
    assert_eq!(tables.node_count(), 13);
    assert!(tables.validate().is_ok());
    assert_eq!(
        tables
            .relationship_table(RelationshipType::Transfer)
            .map(|t| t.rows.len()),
        Some(2)
    );
}

#[tokio::test]
async fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("customers.csv"), CUSTOMERS).unwrap();
    let files = InputFiles::in_dir(dir.path());

    let result = stage_inputs(&files, &geocoder()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_unresolvable_location_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let files = write_inputs(dir.path());

    let result = stage_inputs(&files, &MockGeocoder::new()).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("No location found"));
}
