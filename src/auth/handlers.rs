use crate::{
    auth::{
        jwt::{generate_access_token, verify_token},
        session::{Session, SessionStore},
    },
    config::Config,
    models::{LoginReqDto, LoginResponse},
    store::{StoreError, remote::Remote},
};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, error, info, instrument};

/// Sign in
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Email and password required"),
        (status = 401, description = "Wrong email or password", body = Object, example = json!({
            "message": "Email ou senha incorretos"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Erro ao fazer login"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(remote, sessions, config, user),
    fields(email = %user.email)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    remote: web::Data<Remote>,
    sessions: web::Data<dyn SessionStore>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.email.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().json(json!({
            "message": "Email e senha são obrigatórios"
        }));
    }

    let supervisor = match remote.check_credentials(&user.email, &user.password).await {
        Ok(s) => {
            debug!(supervisor_id = s.id, "Credentials accepted");
            s
        }
        Err(StoreError::Credentials) => {
            info!("Invalid credentials");
            return HttpResponse::Unauthorized().json(json!({
                "message": "Email ou senha incorretos"
            }));
        }
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "message": "Erro ao fazer login"
            }));
        }
    };

    let (access_token, claims) =
        match generate_access_token(&supervisor, &config.jwt_secret, config.access_token_ttl) {
            Ok(issued) => issued,
            Err(e) => {
                error!(error = %e, "Failed to sign access token");
                return HttpResponse::InternalServerError().json(json!({
                    "message": "Erro ao fazer login"
                }));
            }
        };

    sessions.save(
        &claims.jti,
        Session {
            supervisor: supervisor.clone(),
            expires_at: claims.exp,
        },
    );

    info!(supervisor_id = supervisor.id, "Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        supervisor,
    })
}

/// Sign out
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session cleared (also when there was none)")
    ),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    sessions: web::Data<dyn SessionStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    // expired tokens cannot be decoded, and their sessions are gone anyway
    if let Ok(claims) = verify_token(token, &config.jwt_secret) {
        sessions.clear(&claims.jti);
        info!(supervisor_id = claims.supervisor_id, "Signed out");
    }

    HttpResponse::NoContent().finish()
}
