use super::normalize::month_window;
use super::throttle::Throttle;
use crate::client::DiaryApi;
use crate::constants::DATE_INT_FIELD;
use crate::date_codec::{from_service_code, parse_service_code, to_service_code};
use crate::errors::{AppError, AppResult};
use crate::models::{DateRange, Record};
use tracing::debug;

/// Pages through weight readings by remote month window.
///
/// Starts at the first day of `range`, asks for the month containing it, keeps the
/// readings that fall inside `range`, then jumps to the day after the window's
/// reported `to_date_int`. A window that does not move forward is rejected.
pub(super) async fn fetch_weight<A: DiaryApi + ?Sized>(
    api: &A,
    range: DateRange,
    throttle: Throttle,
) -> AppResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut cursor = range.start();

    while cursor <= range.end() {
        let cursor_code = to_service_code(cursor);
        let payload = api.weight_month(cursor_code).await?;
        let window = month_window(&payload)?;

        for reading in &window.days {
            let code = reading
                .get(DATE_INT_FIELD)
                .ok_or_else(|| {
                    AppError::MalformedResponse(format!(
                        "weight reading has no '{DATE_INT_FIELD}'"
                    ))
                })
                .and_then(parse_service_code)?;
            let date = from_service_code(code)?;
            if range.contains(date) {
                records.push(Record::from_entry(reading, date, Some(DATE_INT_FIELD)));
            }
        }

        let last_day = from_service_code(window.to_date_code)?;
        let next = last_day.succ_opt().ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "weight month ends on {last_day}, the last representable day"
            ))
        })?;
        debug!(
            from = %cursor,
            to = %last_day,
            readings = window.days.len(),
            "Fetched weight month"
        );
        if next <= cursor {
            return Err(AppError::MalformedResponse(format!(
                "weight month for {cursor} ends on {last_day}, which does not advance the range"
            )));
        }
        cursor = next;

        throttle.pause().await;
    }

    Ok(records)
}
