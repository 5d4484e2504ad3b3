//! Core product record and lifecycle status
use super::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value of the `docType` tag that marks a product record in the shared
/// key space.
pub const PRODUCT_DOC_TYPE: &str = "product";

/// Lifecycle status of a product. The derived `Ord` reflects the pipeline
/// order; a stored record's status only ever moves forward through it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    Requested,
    Financed,
    SupplierConfirmed,
    ManufacturingRequested,
    InManufacturing,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Requested => "Requested",
            Status::Financed => "Financed",
            Status::SupplierConfirmed => "SupplierConfirmed",
            Status::ManufacturingRequested => "ManufacturingRequested",
            Status::InManufacturing => "InManufacturing",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Requested" => Ok(Status::Requested),
            "Financed" => Ok(Status::Financed),
            "SupplierConfirmed" => Ok(Status::SupplierConfirmed),
            "ManufacturingRequested" => Ok(Status::ManufacturingRequested),
            "InManufacturing" => Ok(Status::InManufacturing),
            "Completed" => Ok(Status::Completed),
            other => Err(LedgerError::Validation(format!(
                "unknown product status: {other}"
            ))),
        }
    }
}

// Field names follow the wire form shared with the other replicas, so the
// serde renames are part of the record's contract, not cosmetics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub product_type: String,
    pub status: Status,
    pub quantity: i64,
    pub price: i64,
    pub supplier: String,
    /// Empty until manufacturing is requested, then write-once.
    pub manufacturer: String,
    pub bank_approval: bool,
    pub financing_amount: i64,
    pub created_at: DateTime<Utc>,
    /// Append-only audit trail, oldest entry first.
    pub history: Vec<String>,
    #[serde(rename = "docType")]
    pub doc_type: String,
}

impl Product {
    /// A freshly requested product as the bank creates it.
    pub fn requested(
        id: impl Into<String>,
        name: impl Into<String>,
        product_type: impl Into<String>,
        quantity: i64,
        price: i64,
        supplier: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product_type: product_type.into(),
            status: Status::Requested,
            quantity,
            price,
            supplier: supplier.into(),
            manufacturer: String::new(),
            bank_approval: false,
            financing_amount: 0,
            created_at,
            history: vec!["Product financing request created by bank".to_string()],
            doc_type: PRODUCT_DOC_TYPE.to_string(),
        }
    }

    pub fn is_product_doc(&self) -> bool {
        self.doc_type == PRODUCT_DOC_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_order_follows_pipeline() {
        assert!(Status::Requested < Status::Financed);
        assert!(Status::Financed < Status::SupplierConfirmed);
        assert!(Status::SupplierConfirmed < Status::ManufacturingRequested);
        assert!(Status::ManufacturingRequested < Status::InManufacturing);
        assert!(Status::InManufacturing < Status::Completed);
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [
            Status::Requested,
            Status::Financed,
            Status::SupplierConfirmed,
            Status::ManufacturingRequested,
            Status::InManufacturing,
            Status::Completed,
        ] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert!("Shipped".parse::<Status>().is_err());
    }

    #[test]
    fn requested_product_starts_with_creation_note() {
        let product = Product::requested(
            "p1",
            "Steel Sheets",
            "RawMaterial",
            1000,
            50_000,
            "SupplierMSP",
            Utc::now(),
        );

        assert_eq!(product.status, Status::Requested);
        assert!(!product.bank_approval);
        assert_eq!(product.financing_amount, 0);
        assert!(product.manufacturer.is_empty());
        assert_eq!(product.history.len(), 1);
        assert!(product.is_product_doc());
    }
}
