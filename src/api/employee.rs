use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::{message, open_board};
use crate::{
    auth::auth::AuthSupervisor,
    board::registry::BoardRegistry,
    config::Config,
    model::employee::{Employee, NewEmployee},
    models::MessageResponse,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "maria silva")]
    pub name: String,
    /// Defaults to `2ª`
    #[schema(example = "2ª", nullable = true)]
    pub shift: Option<String>,
    /// Defaults to `RECEBIMENTO`
    #[schema(example = "expedição", nullable = true)]
    pub sector: Option<String>,
    #[schema(example = "CONFERENTE", nullable = true)]
    pub role: Option<String>,
}

/// List employees of the signed-in supervisor
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "Employees ordered by name", body = [Employee])
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    auth: AuthSupervisor,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let board = open_board(&registry, &auth, &config).await;
    HttpResponse::Ok().json(board.employees().await)
}

/// Add an employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Name missing", body = Object, example = json!({
            "message": "Nome é obrigatório"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro ao adicionar funcionário"
        }))
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
#[instrument(name = "employee_create", skip_all, fields(supervisor_id = auth.id()))]
pub async fn create_employee(
    auth: AuthSupervisor,
    payload: web::Json<CreateEmployee>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let new_employee = match NewEmployee::normalized(
        &payload.name,
        payload.shift.as_deref(),
        payload.sector.as_deref(),
        payload.role.as_deref(),
    ) {
        Some(e) => e,
        None => {
            info!("Validation failed: blank name");
            return message(HttpResponse::BadRequest(), "Nome é obrigatório");
        }
    };

    let board = open_board(&registry, &auth, &config).await;
    match board.add_employee(new_employee).await {
        Some(employee) => HttpResponse::Created().json(employee),
        None => message(HttpResponse::InternalServerError(), "Erro ao adicionar funcionário"),
    }
}

/// Remove an employee
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    params(
        ("id" = u64, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee removed", body = MessageResponse),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro ao remover funcionário"
        }))
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    auth: AuthSupervisor,
    path: web::Path<u64>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let id = path.into_inner();
    let board = open_board(&registry, &auth, &config).await;

    if board.delete_employee(id).await {
        HttpResponse::Ok().json(MessageResponse {
            message: "Funcionário removido".to_string(),
        })
    } else {
        message(HttpResponse::InternalServerError(), "Erro ao remover funcionário")
    }
}
