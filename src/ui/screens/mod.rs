pub(crate) mod bills;
pub(crate) mod categories;
pub(crate) mod dashboard;
