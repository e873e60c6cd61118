use chrono::{Local, NaiveDateTime};

use crate::{AppError, AppState};
use backend_domain::{BookingPeriod, BookingWithEvent};

/// The user's bookings joined with their events. Periods are computed from
/// the event start relative to `now`, never stored.
pub async fn list_user_bookings(
    state: &AppState,
    user_id: &str,
    period: Option<BookingPeriod>,
) -> Result<Vec<BookingWithEvent>, AppError> {
    list_user_bookings_at(state, user_id, period, Local::now().naive_local()).await
}

pub async fn list_user_bookings_at(
    state: &AppState,
    user_id: &str,
    period: Option<BookingPeriod>,
    now: NaiveDateTime,
) -> Result<Vec<BookingWithEvent>, AppError> {
    let history = state.ledger.list_for_user(user_id, now).await?;
    Ok(history
        .into_iter()
        .filter(|entry| period.map_or(true, |wanted| entry.period == wanted))
        .collect())
}
