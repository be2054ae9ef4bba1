//! Controllers owning the bill list and submission screens

pub mod bills;
pub mod new_bill;

pub use bills::{BillsConfig, BillsController};
pub use new_bill::{NewBillConfig, NewBillController, SubmissionState};
