use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the schedules table. An empty `status` means "no record".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2025-03-09", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "P")]
    pub status: String,
}
