use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::supervisor::Supervisor;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "admin@escala.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub supervisor: Supervisor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub supervisor_id: u64,
    pub sub: String, // email
    pub name: String,
    pub exp: usize,
    pub jti: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Successfully deleted")]
    pub message: String,
}
