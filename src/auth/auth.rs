use crate::{config::Config, model::supervisor::Supervisor, store::TenantScope};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

/// Supervisor behind the request, inserted by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthSupervisor {
    pub supervisor: Supervisor,
}

impl FromRequest for AuthSupervisor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthSupervisor>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Not signed in")),
        )
    }
}

impl AuthSupervisor {
    pub fn id(&self) -> u64 {
        self.supervisor.id
    }

    pub fn tenant(&self, config: &Config) -> TenantScope {
        config.tenant_scope(&self.supervisor)
    }
}
