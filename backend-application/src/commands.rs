pub mod booking_commands;
pub mod event_commands;

pub use booking_commands::*;
pub use event_commands::*;
