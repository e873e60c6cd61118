use tracing::error;

use crate::{AppError, AppState};

/// Ready means the attendance invariant holds for every local event.
pub async fn check_readiness(state: &AppState) -> Result<(), AppError> {
    state.ledger.verify_consistency().await.map_err(|err| {
        state.metrics.record_consistency_fault();
        error!("consistency check failed: {}", err);
        AppError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{book_event, create_event};
    use crate::test_support::{attendee, draft, organizer, state};

    #[tokio::test]
    async fn ready_after_bookings() {
        let state = state();
        let event = create_event(&state, &organizer(), draft("Workshop", "2030-09-10", 3))
            .await
            .expect("create");
        book_event(&state, &attendee("u-1"), &event.id).await.expect("book");
        check_readiness(&state).await.expect("ready");
    }
}
