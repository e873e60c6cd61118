// Access control gate
// Ownership and role rules shared by the event store and booking ledger

use crate::entities::{Actor, Booking, Event, EventOrigin};
use crate::value_objects::Role;

pub fn can_create_event(actor: &Actor) -> bool {
    actor.role == Role::Organizer
}

/// External events are never mutable. Local records written before
/// organizer ids existed carry an empty id and fall back to a name match.
pub fn can_mutate_event(actor: &Actor, event: &Event) -> bool {
    match &event.origin {
        EventOrigin::External { .. } => false,
        EventOrigin::Local {
            organizer,
            organizer_id,
            ..
        } => {
            if organizer_id.is_empty() {
                actor.name == *organizer
            } else {
                actor.id == *organizer_id
            }
        }
    }
}

pub fn can_cancel_booking(actor: &Actor, booking: &Booking) -> bool {
    actor.id == booking.user_id || actor.role == Role::Admin
}
