//! Normalized entities built from raw CSV rows

use chrono::{DateTime, Utc};
use customernexus_core::normalize::{
    epoch_seconds, normalize_identifier, normalize_merchant, parse_datetime_utc,
};
use customernexus_core::{CustomerRecord, Error, PurchaseRecord, Result, TransferRecord};

use crate::encode::LabelEncoder;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub cif: i64,
    pub account_number: i64,
    pub card_number: i64,
    pub age: i64,
    /// 1-based gender code
    pub gender: i64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub transaction_id: i64,
    pub sender_account_number: i64,
    pub receiver_account_number: i64,
    pub amount: f64,
    pub transferred_at: DateTime<Utc>,
    pub transfer_epoch: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub transaction_id: i64,
    pub card_number: i64,
    pub merchant: String,
    pub card_issuer: String,
    pub amount: f64,
    pub purchased_at: DateTime<Utc>,
    pub purchase_epoch: i64,
}

/// All normalized entities of one load
#[derive(Debug, Clone, Default)]
pub struct StagedData {
    pub customers: Vec<Customer>,
    pub transfers: Vec<Transfer>,
    pub purchases: Vec<Purchase>,
}

/// Normalize customer rows; every row must already carry coordinates
pub fn stage_customers(records: &[CustomerRecord]) -> Result<Vec<Customer>> {
    let encoder = LabelEncoder::fit(records.iter().map(|r| r.gender.as_str()));

    records
        .iter()
        .map(|record| {
            let (latitude, longitude) = record.coordinates().ok_or_else(|| {
                Error::staging(format!(
                    "Customer {} has no coordinates; geocode before staging",
                    record.cif
                ))
            })?;

            Ok(Customer {
                cif: normalize_identifier("CIF", &record.cif)?,
                account_number: normalize_identifier("AccountNumber", &record.account_number)?,
                card_number: normalize_identifier("CardNumber", &record.card_number)?,
                age: record.age,
                gender: encoder.code(&record.gender)?,
                latitude,
                longitude,
            })
        })
        .collect()
}

pub fn stage_transfers(records: &[TransferRecord]) -> Result<Vec<Transfer>> {
    records
        .iter()
        .map(|record| {
            let transferred_at = parse_datetime_utc("TransferDatetime", &record.transfer_datetime)?;
            Ok(Transfer {
                transaction_id: record.transaction_id,
                sender_account_number: normalize_identifier(
                    "SenderAccountNumber",
                    &record.sender_account_number,
                )?,
                receiver_account_number: normalize_identifier(
                    "ReceiverAccountNumber",
                    &record.receiver_account_number,
                )?,
                amount: record.amount,
                transfer_epoch: epoch_seconds(&transferred_at),
                transferred_at,
            })
        })
        .collect()
}

pub fn stage_purchases(records: &[PurchaseRecord]) -> Result<Vec<Purchase>> {
    records
        .iter()
        .map(|record| {
            let purchased_at = parse_datetime_utc("PurchaseDatetime", &record.purchase_datetime)?;
            Ok(Purchase {
                transaction_id: record.transaction_id,
                card_number: normalize_identifier("CardNumber", &record.card_number)?,
                merchant: normalize_merchant(&record.merchant),
                card_issuer: record.card_issuer.trim().to_string(),
                amount: record.amount,
                purchase_epoch: epoch_seconds(&purchased_at),
                purchased_at,
            })
        })
        .collect()
}
