//! HTML fragments for the bill list and submission screens

pub mod actions;
pub mod bills;
pub mod new_bill;

pub use actions::render_actions;
pub use bills::BillsState;
pub use new_bill::NewBillView;
