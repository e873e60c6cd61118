use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{error, info};

use backend_domain::{
    verify_consistency, Actor, Booking, BookingLedger, BookingTable, BookingWithEvent,
    DomainError, Event, EventDraft, EventPatch, EventStore, EventTable,
};

/// Both tables travel together so a booking or cancellation can update the
/// attendee count and the booking record in one critical section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    pub events: EventTable,
    pub bookings: BookingTable,
}

/// Event store and booking ledger backed by in-memory tables, optionally
/// mirrored to a JSON snapshot after every committed mutation.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            snapshot_path: None,
        }
    }

    /// Opens (or starts) a snapshot-backed store. A snapshot whose counts do
    /// not match its bookings is refused.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let tables = if path.exists() {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("read snapshot {}", path.display()))?;
            let tables: Tables = serde_json::from_str(&content)
                .with_context(|| format!("parse snapshot {}", path.display()))?;
            verify_consistency(&tables.events, &tables.bookings)
                .with_context(|| format!("snapshot {} is inconsistent", path.display()))?;
            info!(
                events = tables.events.len(),
                bookings = tables.bookings.len(),
                "snapshot loaded from {}",
                path.display()
            );
            tables
        } else {
            Tables::default()
        };
        Ok(Self {
            tables: RwLock::new(tables),
            snapshot_path: Some(path),
        })
    }

    pub async fn snapshot(&self) -> Tables {
        self.tables.read().await.clone()
    }

    async fn mutate<T, F>(&self, apply: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Tables) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let mut guard = self.tables.write().await;
        let Some(path) = &self.snapshot_path else {
            return apply(&mut *guard);
        };
        let mut next = guard.clone();
        let value = apply(&mut next)?;
        write_snapshot(path, &next).await.map_err(|err| {
            error!("snapshot write failed, mutation discarded: {}", err);
            DomainError::Storage(err)
        })?;
        *guard = next;
        Ok(value)
    }
}

async fn write_snapshot(path: &Path, tables: &Tables) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let content = serde_json::to_vec_pretty(tables)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn create_event(&self, draft: &EventDraft, actor: &Actor) -> Result<Event, DomainError> {
        self.mutate(|tables| tables.events.create(draft, actor)).await
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, DomainError> {
        Ok(self.tables.read().await.events.get(id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, DomainError> {
        Ok(self.tables.read().await.events.iter().cloned().collect())
    }

    async fn update_event(
        &self,
        id: &str,
        patch: &EventPatch,
        actor: &Actor,
    ) -> Result<Event, DomainError> {
        self.mutate(|tables| tables.events.update(id, patch, actor))
            .await
    }

    async fn delete_event(&self, id: &str, actor: &Actor) -> Result<Event, DomainError> {
        self.mutate(|tables| {
            let Tables { events, bookings } = tables;
            events.delete(id, actor, bookings)
        })
        .await
    }
}

#[async_trait]
impl BookingLedger for InMemoryStore {
    async fn reserve(&self, event_id: &str, user_id: &str) -> Result<Booking, DomainError> {
        let booked_at = Utc::now();
        self.mutate(|tables| {
            let Tables { events, bookings } = tables;
            bookings.book(events, event_id, user_id, booked_at)
        })
        .await
    }

    async fn release(&self, booking_id: &str, actor: &Actor) -> Result<Booking, DomainError> {
        self.mutate(|tables| {
            let Tables { events, bookings } = tables;
            bookings.cancel(events, booking_id, actor)
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<BookingWithEvent>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.bookings.history(&tables.events, user_id, now).collect())
    }

    async fn verify_consistency(&self) -> Result<(), DomainError> {
        let tables = self.tables.read().await;
        verify_consistency(&tables.events, &tables.bookings)
    }
}
