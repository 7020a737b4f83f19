pub mod account;
pub mod chart;
pub mod event;
pub mod overview;
pub mod trade;
pub mod transaction;

pub(crate) mod de;
