use crate::{
    api::{admin, board, employee, report, status},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter)
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(status::list_statuses)
            .service(
                web::scope("/board")
                    .service(web::resource("").route(web::get().to(board::view_board)))
                    .service(web::resource("/month").route(web::post().to(board::shift_month)))
                    .service(web::resource("/cycle").route(web::post().to(board::cycle_status)))
                    .service(web::resource("/reset").route(web::post().to(board::reset_status)))
                    .service(
                        web::resource("/stats/{kind}").route(web::get().to(board::stat_detail)),
                    ),
            )
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/report")
                    .service(web::resource("").route(web::get().to(report::monthly_report)))
                    .service(web::resource("/export").route(web::get().to(report::export_report))),
            )
            .service(
                web::scope("/admin")
                    .service(
                        web::resource("/supervisor")
                            .route(web::post().to(admin::create_supervisor)),
                    )
                    .service(web::resource("/migrate").route(web::post().to(admin::migrate_unowned))),
            ),
    );
}

// LOGIN
//  └─ access_token (ACCESS_TOKEN_TTL, session keyed by its jti)

// API REQUEST
//  └─ Authorization: Bearer access_token, session must still exist

// LOGOUT
//  └─ session removed, token rejected from then on
