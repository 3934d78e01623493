//! Report Store: every exposed write touches exactly one row, so no
//! transactions are needed; SQLite serializes writes internally.

use diesel::prelude::*;

use crate::errors::{AppError, AppResult};
use crate::models::{NewReport, Report, ReportStatus};
use crate::schema::reports;
use crate::DbPool;

/// Inserts a new report and returns the stored row, including the
/// generated id, defaulted status, and insertion timestamp.
pub fn insert_report(pool: &DbPool, new_report: NewReport) -> AppResult<Report> {
    let mut conn = pool.get().map_err(|e| AppError::internal(e.to_string()))?;

    let report = diesel::insert_into(reports::table)
        .values(&new_report)
        .get_result::<Report>(&mut conn)?;

    tracing::info!(
        report_id = report.id,
        has_photo = report.image_path.is_some(),
        "report created"
    );

    Ok(report)
}

/// Lists reports newest-first. With `only_open`, RESOLVED reports are
/// excluded. Id breaks ties within the one-second timestamp resolution.
pub fn list_reports(pool: &DbPool, only_open: bool) -> AppResult<Vec<Report>> {
    let mut conn = pool.get().map_err(|e| AppError::internal(e.to_string()))?;

    let mut query = reports::table.into_boxed();
    if only_open {
        query = query.filter(reports::status.ne(ReportStatus::Resolved));
    }

    let rows = query
        .order((reports::created_at.desc(), reports::id.desc()))
        .load::<Report>(&mut conn)?;

    Ok(rows)
}

/// Sets the status of one report. Returns false when no row matched the id.
/// Membership in the enum is the only constraint; the caller validates the
/// wire value before this point.
pub fn update_status(pool: &DbPool, report_id: i32, status: ReportStatus) -> AppResult<bool> {
    let mut conn = pool.get().map_err(|e| AppError::internal(e.to_string()))?;

    let affected = diesel::update(reports::table.find(report_id))
        .set(reports::status.eq(status))
        .execute(&mut conn)?;

    if affected > 0 {
        tracing::info!(report_id, status = %status, "report status updated");
    }

    Ok(affected > 0)
}
