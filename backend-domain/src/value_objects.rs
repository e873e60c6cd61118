// Domain value objects
pub mod event_type;
pub mod identifiers;
pub mod role;
pub mod scope;

pub use event_type::*;
pub use identifiers::*;
pub use role::*;
pub use scope::*;
