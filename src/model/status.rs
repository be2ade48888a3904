use serde::Serialize;
use strum_macros::{AsRefStr, EnumCount, EnumIter, EnumString};
use utoipa::ToSchema;

/// One entry of the legend: the code stored in the schedules table plus
/// the display attributes used by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusDefinition {
    #[schema(example = "P", value_type = String)]
    pub code: &'static str,
    #[schema(example = "Presente", value_type = String)]
    pub label: &'static str,
    #[schema(example = "bg-green-500", value_type = String)]
    pub color: &'static str,
    #[schema(example = "text-white", value_type = String)]
    pub text_color: &'static str,
}

/// Attendance codes in cycle order. The declaration order here and the
/// order of [`STATUS_LIST`] must stay identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, EnumCount)]
pub enum AttendanceStatus {
    #[strum(serialize = "")]
    Empty,
    #[strum(serialize = "P")]
    Present,
    #[strum(serialize = "F")]
    Vacation,
    #[strum(serialize = "BH")]
    TimeBank,
    #[strum(serialize = "X")]
    Absence,
    #[strum(serialize = "FF")]
    HolidayOff,
    #[strum(serialize = "DT")]
    SundayWorked,
    #[strum(serialize = "FT")]
    HolidayWorked,
    #[strum(serialize = "A")]
    MedicalCertificate,
    #[strum(serialize = "FER")]
    Holiday,
    #[strum(serialize = "DOM")]
    Sunday,
}

pub const STATUS_COUNT: usize = 11;

pub const STATUS_LIST: [StatusDefinition; STATUS_COUNT] = [
    StatusDefinition { code: "", label: "-", color: "bg-transparent", text_color: "text-gray-400" },
    StatusDefinition { code: "P", label: "Presente", color: "bg-green-500", text_color: "text-white" },
    StatusDefinition { code: "F", label: "Férias", color: "bg-yellow-400", text_color: "text-black" },
    StatusDefinition { code: "BH", label: "Banco de Horas", color: "bg-orange-500", text_color: "text-white" },
    StatusDefinition { code: "X", label: "Falta", color: "bg-red-500", text_color: "text-white" },
    StatusDefinition { code: "FF", label: "Folga Feriado", color: "bg-lime-500", text_color: "text-black" },
    StatusDefinition { code: "DT", label: "Dom. Trabalhado", color: "bg-blue-500", text_color: "text-white" },
    StatusDefinition { code: "FT", label: "Fer. Trabalhado", color: "bg-purple-600", text_color: "text-white" },
    StatusDefinition { code: "A", label: "Atestado", color: "bg-cyan-500", text_color: "text-white" },
    StatusDefinition { code: "FER", label: "Feriado", color: "bg-pink-500", text_color: "text-white" },
    StatusDefinition { code: "DOM", label: "Domingo", color: "bg-purple-800", text_color: "text-white" },
];

pub const MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

/// Indexed by `Weekday::num_days_from_sunday()`.
pub const WEEK_DAYS: [&str; 7] = ["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SÁB"];

impl AttendanceStatus {
    pub fn definition(self) -> &'static StatusDefinition {
        &STATUS_LIST[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.definition().code
    }

    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

/// Position of `code` in the cycle table, `None` for codes the table
/// does not know (the store does not reject them).
pub fn position(code: &str) -> Option<usize> {
    AttendanceStatus::from_code(code).map(|s| s as usize)
}

pub fn find(code: &str) -> Option<&'static StatusDefinition> {
    position(code).map(|i| &STATUS_LIST[i])
}

/// Successor in the cycle. Wraps from the last code back to empty; an
/// unknown code behaves as if it sat just before the first entry.
pub fn next_code(current: &str) -> &'static str {
    let next = match position(current) {
        Some(i) => (i + 1) % STATUS_LIST.len(),
        None => 0,
    };
    STATUS_LIST[next].code
}

/// Legend entries shown to the user (everything but the empty code).
pub fn legend() -> &'static [StatusDefinition] {
    &STATUS_LIST[1..]
}
