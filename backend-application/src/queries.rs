pub mod booking_queries;
pub mod event_queries;
pub mod health_queries;

pub use booking_queries::*;
pub use event_queries::*;
pub use health_queries::*;
