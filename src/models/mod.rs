mod bill;

pub use bill::{Bill, BillDraft};
