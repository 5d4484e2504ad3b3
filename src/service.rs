//! Transition engine and query surface for product records
//!
//! Each operation is a pure function of (current world state, caller
//! identity, arguments, transaction timestamp): read the record, check
//! authorization and preconditions, build the complete new record in memory,
//! then issue a single write. On any failure nothing is written.

use super::canonical::{from_canonical_bytes, to_canonical_bytes};
use super::context::TransactionContext;
use super::error::LedgerError;
use super::identity::{BANK_MSP, MANUFACTURER_MSP, SUPPLIER_MSP};
use super::product::{Product, Status};
use super::state::WorldState;
use tracing::{debug, warn};

pub struct ProductLedger<S: WorldState> {
    state: S,
}

impl<S: WorldState> ProductLedger<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Load the current record for `id`, failing with `NotFound` before any
    /// other check runs.
    fn load_product(&self, id: &str) -> Result<Product, LedgerError> {
        let bytes = self
            .state
            .get(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        from_canonical_bytes(&bytes)
    }

    fn store_product(&self, product: &Product) -> Result<(), LedgerError> {
        let bytes = to_canonical_bytes(product)?;
        self.state.put(&product.id, bytes)
    }

    /// Seed the ledger with the demo products used by the sample network.
    pub fn init_ledger(&self, ctx: &TransactionContext) -> Result<(), LedgerError> {
        let mut steel = Product::requested(
            "product1",
            "Steel Sheets",
            "RawMaterial",
            1000,
            50_000,
            SUPPLIER_MSP,
            ctx.timestamp(),
        );
        steel.history = Vec::new();

        let mut components = Product::requested(
            "product2",
            "Electronic Components",
            "Component",
            500,
            25_000,
            SUPPLIER_MSP,
            ctx.timestamp(),
        );
        components.status = Status::Financed;
        components.manufacturer = MANUFACTURER_MSP.to_string();
        components.bank_approval = true;
        components.financing_amount = 25_000;
        components.history = vec![
            "Bank approved financing".to_string(),
            "Supplier confirmed availability".to_string(),
        ];

        for product in [steel, components] {
            self.store_product(&product)?;
        }
        Ok(())
    }

    /// Bank opens a financing request for a new product.
    pub fn create_product(
        &self,
        ctx: &TransactionContext,
        id: &str,
        name: &str,
        product_type: &str,
        quantity: i64,
        price: i64,
        supplier_msp: &str,
    ) -> Result<Product, LedgerError> {
        if self.product_exists(id)? {
            return Err(LedgerError::AlreadyExists(id.to_string()));
        }
        ctx.identity()
            .require("create product financing requests", BANK_MSP)?;

        let product = Product::requested(
            id,
            name,
            product_type,
            quantity,
            price,
            supplier_msp,
            ctx.timestamp(),
        );

        self.store_product(&product)?;
        debug!(id, supplier = supplier_msp, "product financing request created");
        Ok(product)
    }

    /// Bank approves financing, fixing the amount and advancing to Financed.
    pub fn approve_financing(
        &self,
        ctx: &TransactionContext,
        id: &str,
        financing_amount: i64,
    ) -> Result<Product, LedgerError> {
        let mut product = self.load_product(id)?;
        ctx.identity().require("approve financing", BANK_MSP)?;

        if product.bank_approval {
            return Err(LedgerError::InvalidTransition(format!(
                "financing for product {id} already approved"
            )));
        }

        product.bank_approval = true;
        product.financing_amount = financing_amount;
        product.status = Status::Financed;
        product.history.push(format!(
            "Bank approved financing of {financing_amount} on {}",
            ctx.timestamp_text()
        ));

        self.store_product(&product)?;
        debug!(id, financing_amount, "financing approved");
        Ok(product)
    }

    /// The designated supplier confirms it can supply the product.
    pub fn confirm_supply(
        &self,
        ctx: &TransactionContext,
        id: &str,
    ) -> Result<Product, LedgerError> {
        let mut product = self.load_product(id)?;
        ctx.identity().require("confirm supply", SUPPLIER_MSP)?;

        if product.supplier != ctx.identity().msp_id() {
            return Err(LedgerError::Unauthorized(format!(
                "caller is not the designated supplier for product {id}"
            )));
        }
        if !product.bank_approval {
            return Err(LedgerError::InvalidTransition(format!(
                "product {id} needs bank financing approval first"
            )));
        }

        product.status = Status::SupplierConfirmed;
        product.history.push(format!(
            "Supplier confirmed availability on {}",
            ctx.timestamp_text()
        ));

        self.store_product(&product)?;
        debug!(id, "supply confirmed");
        Ok(product)
    }

    /// The designated supplier hands the product to a manufacturer.
    pub fn request_manufacturing(
        &self,
        ctx: &TransactionContext,
        id: &str,
        manufacturer_msp: &str,
    ) -> Result<Product, LedgerError> {
        let mut product = self.load_product(id)?;
        ctx.identity().require("request manufacturing", SUPPLIER_MSP)?;

        if product.supplier != ctx.identity().msp_id() {
            return Err(LedgerError::Unauthorized(format!(
                "caller is not the designated supplier for product {id}"
            )));
        }
        if product.status != Status::SupplierConfirmed {
            return Err(LedgerError::InvalidTransition(format!(
                "product {id} must be supplier confirmed before requesting manufacturing"
            )));
        }

        product.manufacturer = manufacturer_msp.to_string();
        product.status = Status::ManufacturingRequested;
        product.history.push(format!(
            "Manufacturing requested from {manufacturer_msp} on {}",
            ctx.timestamp_text()
        ));

        self.store_product(&product)?;
        debug!(id, manufacturer = manufacturer_msp, "manufacturing requested");
        Ok(product)
    }

    /// The designated manufacturer accepts the request and starts work.
    pub fn accept_manufacturing(
        &self,
        ctx: &TransactionContext,
        id: &str,
    ) -> Result<Product, LedgerError> {
        let mut product = self.load_product(id)?;
        ctx.identity().require("accept manufacturing", MANUFACTURER_MSP)?;

        if product.manufacturer != ctx.identity().msp_id() {
            return Err(LedgerError::Unauthorized(format!(
                "caller is not the designated manufacturer for product {id}"
            )));
        }
        if product.status != Status::ManufacturingRequested {
            return Err(LedgerError::InvalidTransition(format!(
                "manufacturing for product {id} was not requested"
            )));
        }

        product.status = Status::InManufacturing;
        product.history.push(format!(
            "Manufacturing accepted and started on {}",
            ctx.timestamp_text()
        ));

        self.store_product(&product)?;
        debug!(id, "manufacturing accepted");
        Ok(product)
    }

    /// The designated manufacturer finishes, reaching the terminal status.
    pub fn complete_manufacturing(
        &self,
        ctx: &TransactionContext,
        id: &str,
    ) -> Result<Product, LedgerError> {
        let mut product = self.load_product(id)?;
        ctx.identity()
            .require("complete manufacturing", MANUFACTURER_MSP)?;

        if product.manufacturer != ctx.identity().msp_id() {
            return Err(LedgerError::Unauthorized(format!(
                "caller is not the designated manufacturer for product {id}"
            )));
        }
        if product.status != Status::InManufacturing {
            return Err(LedgerError::InvalidTransition(format!(
                "product {id} is not currently in manufacturing"
            )));
        }

        product.status = Status::Completed;
        product
            .history
            .push(format!("Manufacturing completed on {}", ctx.timestamp_text()));

        self.store_product(&product)?;
        debug!(id, "manufacturing completed");
        Ok(product)
    }

    pub fn read_product(&self, id: &str) -> Result<Product, LedgerError> {
        self.load_product(id)
    }

    pub fn product_exists(&self, id: &str) -> Result<bool, LedgerError> {
        Ok(self.state.get(id)?.map(|bytes| !bytes.is_empty()).unwrap_or(false))
    }

    /// All decodable product records in key order.
    ///
    /// Entries that fail to decode, or that carry a foreign `docType`, are
    /// skipped; each skip is reported through a `warn` event rather than
    /// failing the whole scan.
    pub fn get_all_products(&self) -> Result<Vec<Product>, LedgerError> {
        let mut products = Vec::new();
        for (key, bytes) in self.state.range_scan("", "")? {
            match from_canonical_bytes::<Product>(&bytes) {
                Ok(product) if product.is_product_doc() => products.push(product),
                Ok(product) => {
                    warn!(key, doc_type = product.doc_type, "skipping non-product record");
                }
                Err(err) => {
                    warn!(key, error = %err, "skipping undecodable record");
                }
            }
        }
        Ok(products)
    }

    pub fn get_products_by_status(&self, status: Status) -> Result<Vec<Product>, LedgerError> {
        let mut products = self.get_all_products()?;
        products.retain(|product| product.status == status);
        Ok(products)
    }

    /// Audit trail of the record, oldest entry first.
    pub fn get_product_history(&self, id: &str) -> Result<Vec<String>, LedgerError> {
        Ok(self.load_product(id)?.history)
    }
}
