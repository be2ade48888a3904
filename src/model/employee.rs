use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "MARIA SILVA",
        "shift": "2ª",
        "sector": "RECEBIMENTO",
        "role": "CONFERENTE",
        "supervisor_id": 1
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "MARIA SILVA")]
    pub name: String,

    #[schema(example = "2ª")]
    pub shift: String,

    #[schema(example = "RECEBIMENTO")]
    pub sector: String,

    #[schema(example = "CONFERENTE", nullable = true)]
    pub role: Option<String>,

    /// Owning supervisor, empty for rows created before multi-tenancy
    #[schema(example = 1, nullable = true)]
    pub supervisor_id: Option<u64>,
}

/// Insert payload after the add-employee policy has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub shift: String,
    pub sector: String,
    pub role: Option<String>,
}

pub const DEFAULT_SHIFT: &str = "2ª";
pub const DEFAULT_SECTOR: &str = "RECEBIMENTO";

impl NewEmployee {
    /// Trims every field, upper-cases name and sector, fills the form
    /// defaults. `None` when the name is blank.
    pub fn normalized(
        name: &str,
        shift: Option<&str>,
        sector: Option<&str>,
        role: Option<&str>,
    ) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        Some(Self {
            name: name.to_uppercase(),
            shift: non_blank(shift).unwrap_or(DEFAULT_SHIFT).to_string(),
            sector: non_blank(sector).unwrap_or(DEFAULT_SECTOR).to_uppercase(),
            role: non_blank(role).map(str::to_string),
        })
    }
}

impl Employee {
    /// Case-insensitive match on name, sector or shift.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.sector.to_lowercase().contains(&term)
            || self.shift.to_lowercase().contains(&term)
    }
}
