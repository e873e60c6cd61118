// Domain entities
pub mod actor;
pub mod booking;
pub mod config;
pub mod event;
pub mod query;
pub mod vendor;

pub use actor::*;
pub use booking::*;
pub use config::*;
pub use event::*;
pub use query::*;
pub use vendor::*;
