use actix_web::{
    HttpResponse, Responder,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};
use serde_json::json;
use tracing::{error, info};

use super::{MonthQuery, board_error, message, open_board, today};
use crate::{
    auth::auth::AuthSupervisor,
    board::{
        registry::BoardRegistry,
        report::{MonthlyReport, build_report, export_csv, export_file_name},
    },
    config::Config,
};

/// Monthly report
#[utoipa::path(
    get,
    path = "/api/report",
    params(MonthQuery),
    responses(
        (status = 200, description = "Day codes and per-status totals per employee", body = MonthlyReport),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro ao gerar relatório"
        }))
    ),
    tag = "Report",
    security(("bearer_auth" = []))
)]
pub async fn monthly_report(
    auth: AuthSupervisor,
    query: web::Query<MonthQuery>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let window = match query.window(today()) {
        Ok(w) => w,
        Err(e) => return board_error(&e),
    };

    let board = open_board(&registry, &auth, &config).await;
    match board.sheet(window).await {
        Some((employees, grid)) => HttpResponse::Ok().json(build_report(window, &employees, &grid)),
        None => message(HttpResponse::InternalServerError(), "Erro ao gerar relatório"),
    }
}

/// Monthly report as CSV
#[utoipa::path(
    get,
    path = "/api/report/export",
    params(MonthQuery),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro ao gerar relatório"
        }))
    ),
    tag = "Report",
    security(("bearer_auth" = []))
)]
pub async fn export_report(
    auth: AuthSupervisor,
    query: web::Query<MonthQuery>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let window = match query.window(today()) {
        Ok(w) => w,
        Err(e) => return board_error(&e),
    };

    let board = open_board(&registry, &auth, &config).await;
    let Some((employees, grid)) = board.sheet(window).await else {
        return message(HttpResponse::InternalServerError(), "Erro ao gerar relatório");
    };

    match export_csv(window, &employees, &grid) {
        Ok(bytes) => {
            info!(
                year = window.year,
                month = window.month,
                rows = employees.len(),
                "Report exported"
            );
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(export_file_name(window))],
                })
                .body(bytes)
        }
        Err(e) => {
            error!(error = %e, "Failed to write CSV");
            message(HttpResponse::InternalServerError(), "Erro ao gerar relatório")
        }
    }
}
