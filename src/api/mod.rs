pub mod admin;
pub mod board;
pub mod employee;
pub mod report;
pub mod status;

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    auth::auth::AuthSupervisor,
    board::{BoardError, registry::BoardRegistry, session::BoardSession},
    config::Config,
    model::month::MonthWindow,
};

/// Month selector shared by the board and report endpoints. Missing parts
/// fall back to the current month.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    #[param(example = 2025)]
    pub year: Option<i32>,
    /// 1-based
    #[param(example = 3)]
    pub month: Option<u32>,
}

impl MonthQuery {
    pub fn window(&self, today: NaiveDate) -> Result<MonthWindow, BoardError> {
        MonthWindow::new(
            self.year.unwrap_or(today.year()),
            self.month.unwrap_or(today.month()),
        )
        .ok_or(BoardError::InvalidMonth)
    }
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub(crate) async fn open_board(
    registry: &web::Data<BoardRegistry>,
    auth: &AuthSupervisor,
    config: &web::Data<Config>,
) -> Arc<BoardSession> {
    registry.board_for(auth.id(), auth.tenant(config)).await
}

pub(crate) fn message(mut builder: actix_web::HttpResponseBuilder, text: &str) -> HttpResponse {
    builder.json(json!({ "message": text }))
}

pub(crate) fn board_error(err: &BoardError) -> HttpResponse {
    let builder = match err {
        BoardError::NotLoaded => HttpResponse::Conflict(),
        BoardError::DayOutOfRange { .. } | BoardError::InvalidMonth => HttpResponse::BadRequest(),
        BoardError::UnknownEmployee(_) => HttpResponse::NotFound(),
    };
    message(builder, &err.to_string())
}
