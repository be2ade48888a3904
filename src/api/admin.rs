use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::message;
use crate::{
    auth::auth::AuthSupervisor,
    board::registry::BoardRegistry,
    store::{StoreError, remote::Remote},
};

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupervisor {
    #[schema(example = "ana@escala.com", format = "email")]
    pub email: String,
    #[schema(example = "segredo")]
    pub password: String,
    /// Defaults to the part of the email before `@`
    #[schema(example = "Ana", nullable = true)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupervisorCreated {
    #[schema(example = 2)]
    pub id: u64,
    #[schema(example = "Supervisor criado")]
    pub message: String,
}

impl CreateSupervisor {
    /// Email, password and display name once the form rules pass.
    fn validated(&self) -> Result<(String, &str, String), &'static str> {
        let email = self.email.trim();
        if !email.contains('@') {
            return Err("Email inválido");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("A senha deve ter pelo menos 4 caracteres");
        }

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Ok((email.to_string(), &self.password, name))
    }
}

/// Register a supervisor
#[utoipa::path(
    post,
    path = "/api/admin/supervisor",
    request_body = CreateSupervisor,
    responses(
        (status = 201, description = "Supervisor created", body = SupervisorCreated),
        (status = 400, description = "Invalid email or short password", body = Object, example = json!({
            "message": "A senha deve ter pelo menos 4 caracteres"
        })),
        (status = 409, description = "Email already registered", body = Object, example = json!({
            "message": "Email já cadastrado"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro ao criar supervisor"
        }))
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(name = "admin_create_supervisor", skip_all, fields(requested_by = auth.id()))]
pub async fn create_supervisor(
    auth: AuthSupervisor,
    payload: web::Json<CreateSupervisor>,
    remote: web::Data<Remote>,
) -> impl Responder {
    let (email, password, name) = match payload.validated() {
        Ok(fields) => fields,
        Err(reason) => return message(HttpResponse::BadRequest(), reason),
    };

    match remote.create_supervisor(&email, password, &name).await {
        Ok(id) => {
            info!(supervisor_id = id, %email, "Supervisor created");
            HttpResponse::Created().json(SupervisorCreated {
                id,
                message: "Supervisor criado".to_string(),
            })
        }
        Err(StoreError::Rejected(reason)) => message(HttpResponse::Conflict(), &reason),
        Err(_) => message(HttpResponse::InternalServerError(), "Erro ao criar supervisor"),
    }
}

/// Claim unowned data
#[utoipa::path(
    post,
    path = "/api/admin/migrate",
    responses(
        (status = 200, description = "Unowned employees and schedules now belong to the caller", body = Object, example = json!({
            "message": "Migração concluída: 12 funcionário(s), 340 registro(s)",
            "employees": 12,
            "schedules": 340
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro na migração"
        }))
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn migrate_unowned(
    auth: AuthSupervisor,
    remote: web::Data<Remote>,
    registry: web::Data<BoardRegistry>,
) -> impl Responder {
    match remote.migrate_unowned(auth.id()).await {
        Ok(report) => {
            info!(
                supervisor_id = auth.id(),
                employees = report.employees,
                schedules = report.schedules,
                "Unowned data migrated"
            );
            // the cached board was loaded before the rows changed owner
            registry.forget(auth.id()).await;
            HttpResponse::Ok().json(json!({
                "message": format!(
                    "Migração concluída: {} funcionário(s), {} registro(s)",
                    report.employees, report.schedules
                ),
                "employees": report.employees,
                "schedules": report.schedules,
            }))
        }
        Err(_) => message(HttpResponse::InternalServerError(), "Erro na migração"),
    }
}
