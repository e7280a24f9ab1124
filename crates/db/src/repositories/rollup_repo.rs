//! Read-only rollup queries for the dashboard endpoints.
//!
//! Everything here is aggregation over the entity tables; nothing mutates.
//! The optional annotation-type filter is applied with NULL-guarded binds
//! (`$n::text IS NULL OR ...`) so every query stays a single static
//! statement.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::rollup::{
    AnnotationStatusBreakdown, DashboardRollup, EntityCounts, InspectionOutcomeBreakdown,
    LocationBreakdown, OverdueInspection, RecentInspection, TerminalBreakdown, TerminalRollup,
    TimelineMonth, UpcomingInspection,
};

/// Lookahead window for the global upcoming-inspections list, in days.
const GLOBAL_UPCOMING_DAYS: i32 = 30;
/// Lookahead window for the per-terminal upcoming-inspections list, in days.
const TERMINAL_UPCOMING_DAYS: i32 = 90;
/// Recency window for the recent-inspections list, in days.
const RECENT_DAYS: i32 = 7;
/// Row limits for the recent-inspections list.
const GLOBAL_RECENT_LIMIT: i64 = 5;
const TERMINAL_RECENT_LIMIT: i64 = 10;
/// Months covered by the inspection-due timeline.
const TIMELINE_MONTHS: i32 = 12;

/// Provides the dashboard and per-terminal rollups.
pub struct RollupRepo;

impl RollupRepo {
    /// Full dashboard rollup, optionally filtered by annotation type.
    pub async fn dashboard(
        pool: &PgPool,
        annotation_type: Option<&str>,
    ) -> Result<DashboardRollup, sqlx::Error> {
        let counts: EntityCounts = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM terminals) AS terminals,
                (SELECT COUNT(*) FROM locations) AS locations,
                (SELECT COUNT(*) FROM diagrams) AS diagrams,
                (SELECT COUNT(*) FROM annotations a
                  WHERE $1::text IS NULL OR a.annotation_type = $1) AS annotations,
                (SELECT COUNT(*) FROM inspections i
                  JOIN annotations a ON a.id = i.annotation_id
                  WHERE $1::text IS NULL OR a.annotation_type = $1) AS inspections",
        )
        .bind(annotation_type)
        .fetch_one(pool)
        .await?;

        let annotation_statuses: AnnotationStatusBreakdown = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE a.status = 'ok') AS ok,
                COUNT(*) FILTER (WHERE a.status = 'warning') AS warning,
                COUNT(*) FILTER (WHERE a.status = 'critical') AS critical,
                COUNT(*) FILTER (WHERE a.status = 'not_inspected') AS not_inspected
             FROM annotations a
             WHERE $1::text IS NULL OR a.annotation_type = $1",
        )
        .bind(annotation_type)
        .fetch_one(pool)
        .await?;

        let inspection_outcomes: InspectionOutcomeBreakdown = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE i.overall_status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE i.overall_status = 'conditional') AS conditional,
                COUNT(*) FILTER (WHERE i.overall_status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE i.overall_status = 'pending') AS pending
             FROM inspections i
             JOIN annotations a ON a.id = i.annotation_id
             WHERE $1::text IS NULL OR a.annotation_type = $1",
        )
        .bind(annotation_type)
        .fetch_one(pool)
        .await?;

        let upcoming =
            Self::upcoming(pool, annotation_type, None, GLOBAL_UPCOMING_DAYS).await?;
        let overdue = Self::overdue(pool, annotation_type, None).await?;
        let recent = Self::recent(pool, annotation_type, None, GLOBAL_RECENT_LIMIT).await?;

        let terminals: Vec<TerminalBreakdown> = sqlx::query_as(
            "SELECT
                t.id AS terminal_id,
                t.name AS terminal_name,
                COUNT(a.id) AS annotations,
                COUNT(a.id) FILTER (WHERE a.status = 'ok') AS ok,
                COUNT(a.id) FILTER (WHERE a.status = 'warning') AS warning,
                COUNT(a.id) FILTER (WHERE a.status = 'critical') AS critical,
                COUNT(a.id) FILTER (WHERE a.status = 'not_inspected') AS not_inspected
             FROM terminals t
             LEFT JOIN locations l ON l.terminal_id = t.id
             LEFT JOIN diagrams d ON d.location_id = l.id
             LEFT JOIN annotations a ON a.diagram_id = d.id
                  AND ($1::text IS NULL OR a.annotation_type = $1)
             GROUP BY t.id, t.name
             ORDER BY t.name ASC",
        )
        .bind(annotation_type)
        .fetch_all(pool)
        .await?;

        let critical_measurements =
            Self::critical_count(pool, annotation_type, None).await?;
        let timeline = Self::timeline(pool, annotation_type, None).await?;

        Ok(DashboardRollup {
            counts,
            annotation_statuses,
            inspection_outcomes,
            upcoming,
            overdue,
            recent,
            terminals,
            critical_measurements,
            timeline,
        })
    }

    /// Per-terminal rollup. Returns `None` when the terminal is missing.
    pub async fn terminal(
        pool: &PgPool,
        terminal_id: DbId,
        annotation_type: Option<&str>,
    ) -> Result<Option<TerminalRollup>, sqlx::Error> {
        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM terminals WHERE id = $1")
                .bind(terminal_id)
                .fetch_optional(pool)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let counts: EntityCounts = sqlx::query_as(
            "SELECT
                1::bigint AS terminals,
                (SELECT COUNT(*) FROM locations l WHERE l.terminal_id = $2) AS locations,
                (SELECT COUNT(*) FROM diagrams d
                  JOIN locations l ON l.id = d.location_id
                  WHERE l.terminal_id = $2) AS diagrams,
                (SELECT COUNT(*) FROM annotations a
                  JOIN diagrams d ON d.id = a.diagram_id
                  JOIN locations l ON l.id = d.location_id
                  WHERE l.terminal_id = $2
                    AND ($1::text IS NULL OR a.annotation_type = $1)) AS annotations,
                (SELECT COUNT(*) FROM inspections i
                  JOIN annotations a ON a.id = i.annotation_id
                  JOIN diagrams d ON d.id = a.diagram_id
                  JOIN locations l ON l.id = d.location_id
                  WHERE l.terminal_id = $2
                    AND ($1::text IS NULL OR a.annotation_type = $1)) AS inspections",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .fetch_one(pool)
        .await?;

        let annotation_statuses: AnnotationStatusBreakdown = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE a.status = 'ok') AS ok,
                COUNT(*) FILTER (WHERE a.status = 'warning') AS warning,
                COUNT(*) FILTER (WHERE a.status = 'critical') AS critical,
                COUNT(*) FILTER (WHERE a.status = 'not_inspected') AS not_inspected
             FROM annotations a
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             WHERE l.terminal_id = $2
               AND ($1::text IS NULL OR a.annotation_type = $1)",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .fetch_one(pool)
        .await?;

        let inspection_outcomes: InspectionOutcomeBreakdown = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE i.overall_status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE i.overall_status = 'conditional') AS conditional,
                COUNT(*) FILTER (WHERE i.overall_status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE i.overall_status = 'pending') AS pending
             FROM inspections i
             JOIN annotations a ON a.id = i.annotation_id
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             WHERE l.terminal_id = $2
               AND ($1::text IS NULL OR a.annotation_type = $1)",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .fetch_one(pool)
        .await?;

        let upcoming = Self::upcoming(
            pool,
            annotation_type,
            Some(terminal_id),
            TERMINAL_UPCOMING_DAYS,
        )
        .await?;
        let overdue = Self::overdue(pool, annotation_type, Some(terminal_id)).await?;
        let recent = Self::recent(
            pool,
            annotation_type,
            Some(terminal_id),
            TERMINAL_RECENT_LIMIT,
        )
        .await?;

        let locations: Vec<LocationBreakdown> = sqlx::query_as(
            "SELECT
                l.id AS location_id,
                l.name AS location_name,
                COUNT(a.id) AS annotations,
                COUNT(a.id) FILTER (WHERE a.status = 'ok') AS ok,
                COUNT(a.id) FILTER (WHERE a.status = 'warning') AS warning,
                COUNT(a.id) FILTER (WHERE a.status = 'critical') AS critical,
                COUNT(a.id) FILTER (WHERE a.status = 'not_inspected') AS not_inspected
             FROM locations l
             LEFT JOIN diagrams d ON d.location_id = l.id
             LEFT JOIN annotations a ON a.diagram_id = d.id
                  AND ($1::text IS NULL OR a.annotation_type = $1)
             WHERE l.terminal_id = $2
             GROUP BY l.id, l.name
             ORDER BY l.name ASC",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .fetch_all(pool)
        .await?;

        let critical_measurements =
            Self::critical_count(pool, annotation_type, Some(terminal_id)).await?;
        let timeline = Self::timeline(pool, annotation_type, Some(terminal_id)).await?;

        Ok(Some(TerminalRollup {
            terminal_id,
            counts,
            annotation_statuses,
            inspection_outcomes,
            upcoming,
            overdue,
            recent,
            locations,
            critical_measurements,
            timeline,
        }))
    }

    // ── Shared window queries ────────────────────────────────────────

    /// Annotations due within the next `days` days, soonest first.
    async fn upcoming(
        pool: &PgPool,
        annotation_type: Option<&str>,
        terminal_id: Option<DbId>,
        days: i32,
    ) -> Result<Vec<UpcomingInspection>, sqlx::Error> {
        sqlx::query_as(
            "SELECT
                a.id AS annotation_id,
                a.kks_number,
                a.annotation_type,
                d.id AS diagram_id,
                d.name AS diagram_name,
                t.name AS terminal_name,
                a.next_inspection,
                (a.next_inspection - CURRENT_DATE) AS days_until
             FROM annotations a
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             JOIN terminals t ON t.id = l.terminal_id
             WHERE a.next_inspection >= CURRENT_DATE
               AND a.next_inspection <= CURRENT_DATE + $3
               AND ($1::text IS NULL OR a.annotation_type = $1)
               AND ($2::bigint IS NULL OR l.terminal_id = $2)
             ORDER BY a.next_inspection ASC",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Annotations whose next inspection date has passed, most overdue first.
    async fn overdue(
        pool: &PgPool,
        annotation_type: Option<&str>,
        terminal_id: Option<DbId>,
    ) -> Result<Vec<OverdueInspection>, sqlx::Error> {
        sqlx::query_as(
            "SELECT
                a.id AS annotation_id,
                a.kks_number,
                a.annotation_type,
                d.id AS diagram_id,
                d.name AS diagram_name,
                t.name AS terminal_name,
                a.next_inspection,
                (CURRENT_DATE - a.next_inspection) AS days_overdue
             FROM annotations a
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             JOIN terminals t ON t.id = l.terminal_id
             WHERE a.next_inspection < CURRENT_DATE
               AND ($1::text IS NULL OR a.annotation_type = $1)
               AND ($2::bigint IS NULL OR l.terminal_id = $2)
             ORDER BY a.next_inspection ASC",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .fetch_all(pool)
        .await
    }

    /// Inspections created within the recency window, newest first.
    async fn recent(
        pool: &PgPool,
        annotation_type: Option<&str>,
        terminal_id: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<RecentInspection>, sqlx::Error> {
        sqlx::query_as(
            "SELECT
                i.id,
                i.annotation_id,
                a.kks_number,
                i.inspection_date,
                i.overall_status,
                i.inspector_name,
                i.created_at
             FROM inspections i
             JOIN annotations a ON a.id = i.annotation_id
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             WHERE i.created_at >= now() - make_interval(days => $3)
               AND ($1::text IS NULL OR a.annotation_type = $1)
               AND ($2::bigint IS NULL OR l.terminal_id = $2)
             ORDER BY i.created_at DESC
             LIMIT $4",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .bind(RECENT_DAYS)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Measurements below their alert threshold, optionally scoped to a
    /// terminal.
    async fn critical_count(
        pool: &PgPool,
        annotation_type: Option<&str>,
        terminal_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*)
             FROM thickness_measurements tm
             JOIN inspections i ON i.id = tm.inspection_id
             JOIN annotations a ON a.id = i.annotation_id
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             WHERE tm.t_measured IS NOT NULL
               AND tm.t_alert IS NOT NULL
               AND tm.t_measured < tm.t_alert
               AND ($1::text IS NULL OR a.annotation_type = $1)
               AND ($2::bigint IS NULL OR l.terminal_id = $2)",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Count of annotations due per calendar month over the next twelve
    /// months, in `YYYY-MM` order.
    async fn timeline(
        pool: &PgPool,
        annotation_type: Option<&str>,
        terminal_id: Option<DbId>,
    ) -> Result<Vec<TimelineMonth>, sqlx::Error> {
        sqlx::query_as(
            "SELECT
                to_char(a.next_inspection, 'YYYY-MM') AS month,
                COUNT(*) AS due
             FROM annotations a
             JOIN diagrams d ON d.id = a.diagram_id
             JOIN locations l ON l.id = d.location_id
             WHERE a.next_inspection >= date_trunc('month', CURRENT_DATE)
               AND a.next_inspection
                   < date_trunc('month', CURRENT_DATE) + make_interval(months => $3)
               AND ($1::text IS NULL OR a.annotation_type = $1)
               AND ($2::bigint IS NULL OR l.terminal_id = $2)
             GROUP BY 1
             ORDER BY 1 ASC",
        )
        .bind(annotation_type)
        .bind(terminal_id)
        .bind(TIMELINE_MONTHS)
        .fetch_all(pool)
        .await
    }
}
