use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account that owns a roster in multi-tenant mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Supervisor {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "admin@escala.com")]
    pub email: String,
    #[schema(example = "admin")]
    pub name: String,
}
