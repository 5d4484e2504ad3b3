//! String-typed invoke surface
//!
//! The host hands the engine an operation name and ordered string arguments.
//! Numeric arguments are parsed here; the result is the canonical text of
//! the affected record (or queried data), which is what the host compares
//! across replicas.

use super::canonical::to_canonical_json;
use super::context::TransactionContext;
use super::error::LedgerError;
use super::product::Status;
use super::service::ProductLedger;
use super::state::WorldState;

fn expect_args(op: &str, args: &[&str], count: usize) -> Result<(), LedgerError> {
    if args.len() != count {
        return Err(LedgerError::Validation(format!(
            "{op} expects {count} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

fn parse_int(op: &str, name: &str, raw: &str) -> Result<i64, LedgerError> {
    raw.parse::<i64>().map_err(|_| {
        LedgerError::Validation(format!("{op}: {name} is not an integer: {raw:?}"))
    })
}

impl<S: WorldState> ProductLedger<S> {
    /// Route one invocation to the matching operation and canonicalize the
    /// result. Unknown operations and malformed arguments fail with
    /// `Validation` before anything is read or written.
    pub fn dispatch(
        &self,
        op: &str,
        args: &[&str],
        ctx: &TransactionContext,
    ) -> Result<String, LedgerError> {
        match op {
            "InitLedger" => {
                expect_args(op, args, 0)?;
                self.init_ledger(ctx)?;
                Ok(String::new())
            }
            "CreateProduct" => {
                expect_args(op, args, 6)?;
                let quantity = parse_int(op, "quantity", args[3])?;
                let price = parse_int(op, "price", args[4])?;
                let product =
                    self.create_product(ctx, args[0], args[1], args[2], quantity, price, args[5])?;
                to_canonical_json(&product)
            }
            "ApproveFinancing" => {
                expect_args(op, args, 2)?;
                let amount = parse_int(op, "financingAmount", args[1])?;
                let product = self.approve_financing(ctx, args[0], amount)?;
                to_canonical_json(&product)
            }
            "ConfirmSupply" => {
                expect_args(op, args, 1)?;
                let product = self.confirm_supply(ctx, args[0])?;
                to_canonical_json(&product)
            }
            "RequestManufacturing" => {
                expect_args(op, args, 2)?;
                let product = self.request_manufacturing(ctx, args[0], args[1])?;
                to_canonical_json(&product)
            }
            "AcceptManufacturing" => {
                expect_args(op, args, 1)?;
                let product = self.accept_manufacturing(ctx, args[0])?;
                to_canonical_json(&product)
            }
            "CompleteManufacturing" => {
                expect_args(op, args, 1)?;
                let product = self.complete_manufacturing(ctx, args[0])?;
                to_canonical_json(&product)
            }
            "ReadProduct" => {
                expect_args(op, args, 1)?;
                let product = self.read_product(args[0])?;
                to_canonical_json(&product)
            }
            "ProductExists" => {
                expect_args(op, args, 1)?;
                let exists = self.product_exists(args[0])?;
                Ok(exists.to_string())
            }
            "GetAllProducts" => {
                expect_args(op, args, 0)?;
                let products = self.get_all_products()?;
                to_canonical_json(&products)
            }
            "GetProductsByStatus" => {
                expect_args(op, args, 1)?;
                let status: Status = args[0].parse()?;
                let products = self.get_products_by_status(status)?;
                to_canonical_json(&products)
            }
            "GetProductHistory" => {
                expect_args(op, args, 1)?;
                let history = self.get_product_history(args[0])?;
                to_canonical_json(&history)
            }
            other => Err(LedgerError::Validation(format!(
                "unknown operation: {other}"
            ))),
        }
    }
}
