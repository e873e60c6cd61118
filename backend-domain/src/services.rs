// Domain services
pub mod access;
pub mod aggregation;
pub mod booking_ledger;
pub mod event_store;
pub mod normalizer;

pub use access::*;
pub use aggregation::*;
pub use booking_ledger::*;
pub use event_store::*;
pub use normalizer::*;
