use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use super::{MonthQuery, board_error, message, open_board, today};
use crate::{
    auth::auth::AuthSupervisor,
    board::{
        BoardView,
        registry::BoardRegistry,
        render::CellView,
        stats::{StatDetail, StatKind},
    },
    config::Config,
    models::MessageResponse,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BoardQuery {
    #[param(example = 2025)]
    pub year: Option<i32>,
    #[param(example = 3)]
    pub month: Option<u32>,
    /// Filters the rendered rows by name, sector or shift
    #[param(example = "receb")]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MonthStep {
    #[schema(example = -1)]
    pub delta: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CellTarget {
    #[schema(example = 10)]
    pub employee_id: u64,
    #[schema(example = 15)]
    pub day: u32,
}

/// Load and view the board
#[utoipa::path(
    get,
    path = "/api/board",
    params(BoardQuery),
    responses(
        (status = 200, description = "Board for the requested month", body = BoardView),
        (status = 400, description = "Invalid month", body = MessageResponse),
        (status = 500, description = "Board could not be loaded", body = Object, example = json!({
            "message": "Erro ao carregar escala"
        }))
    ),
    tag = "Board",
    security(("bearer_auth" = []))
)]
#[instrument(name = "board_view", skip_all, fields(supervisor_id = auth.id()))]
pub async fn view_board(
    auth: AuthSupervisor,
    query: web::Query<BoardQuery>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let today = today();
    let selector = MonthQuery {
        year: query.year,
        month: query.month,
    };
    let window = match selector.window(today) {
        Ok(w) => w,
        Err(e) => return board_error(&e),
    };

    let board = open_board(&registry, &auth, &config).await;
    if !board.load(window).await {
        debug!(year = window.year, month = window.month, "Load not applied");
    }

    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match board.view(search, today).await {
        Ok(view) => HttpResponse::Ok().json(view),
        // nothing was ever loaded and this load failed too
        Err(_) => message(HttpResponse::InternalServerError(), "Erro ao carregar escala"),
    }
}

/// Move to another month
#[utoipa::path(
    post,
    path = "/api/board/month",
    request_body = MonthStep,
    responses(
        (status = 200, description = "Board for the new month", body = BoardView),
        (status = 400, description = "Step leaves the supported calendar", body = MessageResponse),
        (status = 500, description = "Board could not be loaded", body = MessageResponse)
    ),
    tag = "Board",
    security(("bearer_auth" = []))
)]
pub async fn shift_month(
    auth: AuthSupervisor,
    payload: web::Json<MonthStep>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let today = today();
    let board = open_board(&registry, &auth, &config).await;
    let target = match board.shift_month(payload.delta, today).await {
        Ok(t) => t,
        Err(e) => return board_error(&e),
    };
    debug!(year = target.year, month = target.month, "Month navigation");

    match board.view(None, today).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(_) => message(HttpResponse::InternalServerError(), "Erro ao carregar escala"),
    }
}

/// Advance a cell to the next status
#[utoipa::path(
    post,
    path = "/api/board/cycle",
    request_body = CellTarget,
    responses(
        (status = 200, description = "Cell after the change", body = CellView),
        (status = 400, description = "Day outside the viewed month", body = MessageResponse),
        (status = 404, description = "Employee not on the board", body = MessageResponse),
        (status = 409, description = "Board not loaded yet", body = MessageResponse)
    ),
    tag = "Board",
    security(("bearer_auth" = []))
)]
pub async fn cycle_status(
    auth: AuthSupervisor,
    payload: web::Json<CellTarget>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let board = open_board(&registry, &auth, &config).await;
    match board.cycle_status(payload.employee_id, payload.day).await {
        Ok(cell) => HttpResponse::Ok().json(cell),
        Err(e) => board_error(&e),
    }
}

/// Clear a cell
#[utoipa::path(
    post,
    path = "/api/board/reset",
    request_body = CellTarget,
    responses(
        (status = 200, description = "Cell after the change", body = CellView),
        (status = 400, description = "Day outside the viewed month", body = MessageResponse),
        (status = 404, description = "Employee not on the board", body = MessageResponse),
        (status = 409, description = "Board not loaded yet", body = MessageResponse)
    ),
    tag = "Board",
    security(("bearer_auth" = []))
)]
pub async fn reset_status(
    auth: AuthSupervisor,
    payload: web::Json<CellTarget>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let board = open_board(&registry, &auth, &config).await;
    match board.reset_status(payload.employee_id, payload.day).await {
        Ok(cell) => HttpResponse::Ok().json(cell),
        Err(e) => board_error(&e),
    }
}

/// Drill into a summary card
#[utoipa::path(
    get,
    path = "/api/board/stats/{kind}",
    params(
        ("kind" = String, Path, description = "total, present or absent")
    ),
    responses(
        (status = 200, description = "Employees behind the card", body = StatDetail),
        (status = 400, description = "Unknown card", body = Object, example = json!({
            "message": "Unknown statistic: late"
        })),
        (status = 409, description = "Board not loaded yet", body = MessageResponse)
    ),
    tag = "Board",
    security(("bearer_auth" = []))
)]
pub async fn stat_detail(
    auth: AuthSupervisor,
    path: web::Path<String>,
    registry: web::Data<BoardRegistry>,
    config: web::Data<Config>,
) -> impl Responder {
    let kind = match StatKind::from_str(&path) {
        Ok(k) => k,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "message": format!("Unknown statistic: {}", path.as_str()) }));
        }
    };

    let board = open_board(&registry, &auth, &config).await;
    match board.drill_down(kind, today()).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => board_error(&e),
    }
}
