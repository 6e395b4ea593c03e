#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
#[allow(dead_code)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin-id".to_string(),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_point_admin_user(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        roles: vec!["point_admin".to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
