//! Row types for the three input CSV files
//!
//! Field names follow the CSV headers exactly. Any extra column in a file is
//! ignored by the deserializer.

use serde::{Deserialize, Serialize};

/// One row of `customers.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "CIF")]
    pub cif: String,
    #[serde(rename = "AccountNumber")]
    pub account_number: String,
    #[serde(rename = "CardNumber")]
    pub card_number: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: i64,
    /// Present only when the file has already been geocoded
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
}

impl CustomerRecord {
    /// Both coordinates, if the row carries them
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// One row of `transfers.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    #[serde(rename = "TransactionID")]
    pub transaction_id: i64,
    #[serde(rename = "SenderAccountNumber")]
    pub sender_account_number: String,
    #[serde(rename = "ReceiverAccountNumber")]
    pub receiver_account_number: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "TransferDatetime")]
    pub transfer_datetime: String,
}

/// One row of `purchases.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(rename = "TransactionID")]
    pub transaction_id: i64,
    #[serde(rename = "CardNumber")]
    pub card_number: String,
    #[serde(rename = "Merchant")]
    pub merchant: String,
    #[serde(rename = "CardIssuer")]
    pub card_issuer: String,
    #[serde(rename = "PurchaseDatetime")]
    pub purchase_datetime: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}
