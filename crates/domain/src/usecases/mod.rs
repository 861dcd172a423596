//! Application use cases / business logic

pub mod check;
pub mod classify;

pub use check::{CheckError, CheckUseCase, extract_barcode};
pub use classify::{NO_FLAGGED_REASON, classify, classify_with};
