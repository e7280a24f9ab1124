//! Repository for the `isolation_plans` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::isolation_plan::{
    CreateIsolationPlan, IsolationPlan, IsolationPlanDetail, IsolationPlanSummary,
    UpdateIsolationPlan,
};
use crate::repositories::isolation_point_repo::IsolationPointRepo;

/// Column list for isolation_plans queries.
const COLUMNS: &str = "id, diagram_id, name, description, equipment_tag, work_order, \
    status, planned_start, planned_end, actual_start, actual_end, point_size, \
    created_by, approved_by, approved_at, created_at, updated_at";

/// Qualified column list for joined queries.
const P_COLUMNS: &str = "p.id, p.diagram_id, p.name, p.description, p.equipment_tag, \
    p.work_order, p.status, p.planned_start, p.planned_end, p.actual_start, \
    p.actual_end, p.point_size, p.created_by, p.approved_by, p.approved_at, \
    p.created_at, p.updated_at";

/// Provides lifecycle and CRUD operations for isolation plans.
pub struct IsolationPlanRepo;

impl IsolationPlanRepo {
    /// Insert a new plan in `draft` status. `point_size` defaults to 22.
    pub async fn create(
        pool: &PgPool,
        diagram_id: DbId,
        input: &CreateIsolationPlan,
        created_by: DbId,
    ) -> Result<IsolationPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO isolation_plans
                (diagram_id, name, description, equipment_tag, work_order,
                 planned_start, planned_end, point_size, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 22), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IsolationPlan>(&query)
            .bind(diagram_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.equipment_tag)
            .bind(&input.work_order)
            .bind(input.planned_start)
            .bind(input.planned_end)
            .bind(input.point_size)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a plan by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<IsolationPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM isolation_plans WHERE id = $1");
        sqlx::query_as::<_, IsolationPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a plan with creator/approver names and its points embedded.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<IsolationPlanDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, uc.full_name AS created_by_name,
                    ua.full_name AS approved_by_name
             FROM isolation_plans p
             JOIN users uc ON uc.id = p.created_by
             LEFT JOIN users ua ON ua.id = p.approved_by
             WHERE p.id = $1"
        );
        let row: Option<PlanWithNames> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let points = IsolationPointRepo::list_by_plan(pool, id).await?;

        Ok(Some(IsolationPlanDetail {
            plan: row.plan,
            created_by_name: Some(row.created_by_name),
            approved_by_name: row.approved_by_name,
            points,
        }))
    }

    /// List all plans with derived point counts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<IsolationPlanSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS},
                    COUNT(pt.id) AS point_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'isolated') AS isolated_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'verified') AS verified_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'restored') AS restored_count
             FROM isolation_plans p
             LEFT JOIN isolation_points pt ON pt.plan_id = p.id
             GROUP BY p.id
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, IsolationPlanSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all plans on a diagram with derived point counts.
    pub async fn list_by_diagram(
        pool: &PgPool,
        diagram_id: DbId,
    ) -> Result<Vec<IsolationPlanSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS},
                    COUNT(pt.id) AS point_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'isolated') AS isolated_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'verified') AS verified_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'restored') AS restored_count
             FROM isolation_plans p
             LEFT JOIN isolation_points pt ON pt.plan_id = p.id
             WHERE p.diagram_id = $1
             GROUP BY p.id
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, IsolationPlanSummary>(&query)
            .bind(diagram_id)
            .fetch_all(pool)
            .await
    }

    /// List plans that are approved or in the field, soonest start first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<IsolationPlanSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS},
                    COUNT(pt.id) AS point_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'isolated') AS isolated_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'verified') AS verified_count,
                    COUNT(pt.id) FILTER (WHERE pt.status = 'restored') AS restored_count
             FROM isolation_plans p
             LEFT JOIN isolation_points pt ON pt.plan_id = p.id
             WHERE p.status IN ('approved', 'active')
             GROUP BY p.id
             ORDER BY p.planned_start ASC NULLS LAST"
        );
        sqlx::query_as::<_, IsolationPlanSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply the generic plan update.
    ///
    /// `name`, `status` and `point_size` keep their prior value when absent;
    /// descriptive and schedule fields are written verbatim (omission clears
    /// them). Callers validate any status change against the plan lifecycle
    /// before calling. Approval stamps are untouchable from here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIsolationPlan,
    ) -> Result<Option<IsolationPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE isolation_plans SET
                name = COALESCE($1, name),
                status = COALESCE($2, status),
                point_size = COALESCE($3, point_size),
                description = $4,
                equipment_tag = $5,
                work_order = $6,
                planned_start = $7,
                planned_end = $8,
                actual_start = $9,
                actual_end = $10
             WHERE id = $11
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IsolationPlan>(&query)
            .bind(&input.name)
            .bind(&input.status)
            .bind(input.point_size)
            .bind(&input.description)
            .bind(&input.equipment_tag)
            .bind(&input.work_order)
            .bind(input.planned_start)
            .bind(input.planned_end)
            .bind(input.actual_start)
            .bind(input.actual_end)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp a plan approved. The stamp is written at most once: a plan
    /// whose `approved_by` is already set is left untouched and `None` is
    /// returned.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        approved_by: DbId,
    ) -> Result<Option<IsolationPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE isolation_plans SET
                status = 'approved',
                approved_by = $2,
                approved_at = now()
             WHERE id = $1 AND approved_by IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IsolationPlan>(&query)
            .bind(id)
            .bind(approved_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plan and, by cascade, its points. Deletion is not guarded
    /// by plan status. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM isolation_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Internal row shape for [`IsolationPlanRepo::find_detail`].
#[derive(sqlx::FromRow)]
struct PlanWithNames {
    #[sqlx(flatten)]
    plan: IsolationPlan,
    created_by_name: String,
    approved_by_name: Option<String>,
}
