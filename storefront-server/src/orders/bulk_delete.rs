//! Bulk order deletion: date window and confirmation

use chrono::{Days, NaiveDate, NaiveTime};
use shared::error::AppError;
use shared::models::{BulkDeleteConfirm, BulkDeleteRequest};

use crate::db::CreatedWindow;

fn start_of_day(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Inclusive UTC date range → half-open creation window
///
/// The start bound begins at 00:00 of `start_date`; the end bound runs
/// through the last instant of `end_date`.
pub fn deletion_window(req: &BulkDeleteRequest) -> Result<CreatedWindow, AppError> {
    if let (Some(start), Some(end)) = (req.start_date, req.end_date)
        && start > end
    {
        return Err(AppError::validation("start_date must not be after end_date")
            .with_detail("start_date", start.to_string())
            .with_detail("end_date", end.to_string()));
    }

    let until = match req.end_date {
        Some(end) => Some(
            end.checked_add_days(Days::new(1))
                .map(start_of_day)
                .ok_or_else(|| AppError::validation("end_date is out of range"))?,
        ),
        None => None,
    };
    let window = CreatedWindow {
        from: req.start_date.map(start_of_day),
        until,
    };

    let expected = if window.is_unbounded() {
        BulkDeleteConfirm::Everything
    } else {
        BulkDeleteConfirm::Range
    };
    if req.confirm != Some(expected) {
        let token = match expected {
            BulkDeleteConfirm::Range => "range",
            BulkDeleteConfirm::Everything => "everything",
        };
        return Err(AppError::confirmation_required(token));
    }

    Ok(window)
}
