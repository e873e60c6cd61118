// Event store rules
// CRUD over the local event table with ownership and deletion safety

use serde::{Deserialize, Serialize};

use crate::entities::{Actor, Event, EventDraft, EventOrigin, EventPatch};
use crate::errors::DomainError;
use crate::services::access::{can_create_event, can_mutate_event};
use crate::services::booking_ledger::BookingTable;
use crate::value_objects::{new_event_id, vendor_id_of};

/// Local events in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTable {
    events: Vec<Event>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> + Clone {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn create(&mut self, draft: &EventDraft, actor: &Actor) -> Result<Event, DomainError> {
        if !can_create_event(actor) {
            return Err(DomainError::Forbidden(
                "only organizers can create events".to_string(),
            ));
        }
        let fields = draft.validate()?;
        let event = Event::local(new_event_id(), fields, &actor.id, &actor.name);
        self.insert(event.clone())?;
        Ok(event)
    }

    /// Inserts an already-built local event, e.g. when seeding or restoring.
    pub fn insert(&mut self, event: Event) -> Result<(), DomainError> {
        if event.is_external() || vendor_id_of(&event.id).is_some() {
            return Err(DomainError::validation(format!(
                "event '{}' belongs to the external namespace",
                event.id
            )));
        }
        if self.get(&event.id).is_some() {
            return Err(DomainError::Conflict(format!(
                "event '{}' already exists",
                event.id
            )));
        }
        self.events.push(event);
        Ok(())
    }

    pub fn update(
        &mut self,
        id: &str,
        patch: &EventPatch,
        actor: &Actor,
    ) -> Result<Event, DomainError> {
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| DomainError::event_not_found(id))?;
        if !can_mutate_event(actor, event) {
            return Err(DomainError::Forbidden(
                "not authorized to edit this event".to_string(),
            ));
        }
        patch.apply_to(event)?;
        Ok(event.clone())
    }

    /// Deletes an event only when no active booking references it.
    pub fn delete(
        &mut self,
        id: &str,
        actor: &Actor,
        bookings: &BookingTable,
    ) -> Result<Event, DomainError> {
        let index = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| DomainError::event_not_found(id))?;
        if !can_mutate_event(actor, &self.events[index]) {
            return Err(DomainError::Forbidden(
                "not authorized to delete this event".to_string(),
            ));
        }
        let active = bookings.active_count(id);
        if active > 0 {
            return Err(DomainError::Conflict(format!(
                "cannot delete event with {} existing bookings; \
                 cancel bookings first or contact attendees",
                active
            )));
        }
        Ok(self.events.remove(index))
    }

    pub(crate) fn increment_attendees(&mut self, id: &str) -> Result<(), DomainError> {
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| DomainError::event_not_found(id))?;
        let capacity = event.capacity;
        match &mut event.origin {
            EventOrigin::Local { attendees, .. } if *attendees < capacity => {
                *attendees += 1;
                Ok(())
            }
            EventOrigin::Local { .. } => Err(DomainError::Capacity {
                event_id: id.to_string(),
                capacity,
            }),
            EventOrigin::External { .. } => Err(DomainError::Consistency(format!(
                "external event '{}' stored in the local table",
                id
            ))),
        }
    }

    pub(crate) fn decrement_attendees(&mut self, id: &str) -> Result<(), DomainError> {
        let event = self.events.iter_mut().find(|event| event.id == id).ok_or_else(|| {
            DomainError::Consistency(format!("booking references missing event '{}'", id))
        })?;
        match &mut event.origin {
            EventOrigin::Local { attendees, .. } if *attendees > 0 => {
                *attendees -= 1;
                Ok(())
            }
            EventOrigin::Local { .. } => Err(DomainError::Consistency(format!(
                "event '{}' already has zero attendees",
                id
            ))),
            EventOrigin::External { .. } => Err(DomainError::Consistency(format!(
                "external event '{}' stored in the local table",
                id
            ))),
        }
    }
}
