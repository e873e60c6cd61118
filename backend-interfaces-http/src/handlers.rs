pub mod booking_handlers;
pub mod event_handlers;
pub mod ops_handlers;

pub use booking_handlers::*;
pub use event_handlers::*;
pub use ops_handlers::*;
