//! Caller identity and the per-operation authorization check
//!
//! The MSP ID is resolved by the execution environment from the caller's
//! certificate chain. It is never taken from an operation argument, which is
//! what makes it usable as the sole anchor of authorization.

use super::error::LedgerError;

pub const BANK_MSP: &str = "BankMSP";
pub const SUPPLIER_MSP: &str = "SupplierMSP";
pub const MANUFACTURER_MSP: &str = "ManufacturerMSP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    msp_id: String,
}

impl ClientIdentity {
    pub fn new(msp_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
        }
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// Fail unless the caller belongs to `expected_msp`. `action` names the
    /// operation for the error message only.
    pub fn require(&self, action: &str, expected_msp: &str) -> Result<(), LedgerError> {
        if self.msp_id != expected_msp {
            return Err(LedgerError::Unauthorized(format!(
                "only {expected_msp} can {action}, caller is {}",
                self.msp_id
            )));
        }
        Ok(())
    }
}
