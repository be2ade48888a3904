use crate::api::admin::{CreateSupervisor, SupervisorCreated};
use crate::api::board::{CellTarget, MonthStep};
use crate::api::employee::CreateEmployee;
use crate::board::render::{CellTreatment, CellView, DayHeader};
use crate::board::report::{MonthlyReport, ReportRow};
use crate::board::stats::{StatDetail, StatItem, Summary, TallyBucket};
use crate::board::{BoardView, RowView};
use crate::model::{
    employee::Employee, month::MonthWindow, status::StatusDefinition, supervisor::Supervisor,
};
use crate::models::{LoginReqDto, LoginResponse, MessageResponse};
use crate::store::MigrationReport;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Escala API",
        version = "0.1.0",
        description = r#"
## Monthly attendance board

Supervisors sign in and keep a month grid of employees × days, one status
code per cell.

### Key Features
- **Board**
  - View a month, move between months, cycle or clear a cell
  - Summary cards (employees, present today, absences this month) with drill-down
- **Employees**
  - List, add and remove employees of the signed-in supervisor
- **Reports**
  - Monthly sheet with per-status totals, JSON or CSV download
- **Admin**
  - Register supervisors, claim data created before multi-tenancy

### Security
Everything under `/api` needs a **JWT Bearer** token from `/auth/login`.
Signing out ends the session even if the token has not expired.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,

        crate::api::status::list_statuses,

        crate::api::board::view_board,
        crate::api::board::shift_month,
        crate::api::board::cycle_status,
        crate::api::board::reset_status,
        crate::api::board::stat_detail,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::report::monthly_report,
        crate::api::report::export_report,

        crate::api::admin::create_supervisor,
        crate::api::admin::migrate_unowned
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            MessageResponse,
            Supervisor,
            StatusDefinition,
            MonthWindow,
            DayHeader,
            CellTreatment,
            CellView,
            RowView,
            BoardView,
            Summary,
            StatItem,
            StatDetail,
            MonthStep,
            CellTarget,
            Employee,
            CreateEmployee,
            TallyBucket,
            ReportRow,
            MonthlyReport,
            CreateSupervisor,
            SupervisorCreated,
            MigrationReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sign in and out"),
        (name = "Board", description = "Attendance board APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Report", description = "Monthly report APIs"),
        (name = "Admin", description = "Supervisor administration APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
