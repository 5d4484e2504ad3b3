//! Ledger transaction engine for a bank / supplier / manufacturer
//! supply-chain financing network.
//!
//! Every operation is a deterministic function of the current world state,
//! the caller's MSP identity and the invocation arguments, so independent
//! replicas that execute the same transaction write byte-identical records.

pub mod canonical;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod identity;
pub mod product;
pub mod service;
pub mod state;
