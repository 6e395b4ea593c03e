use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, ConnectInfo, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Corpo JSON inválido: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Sintaxe JSON inválida: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Cabeçalho Content-Type: application/json ausente.".to_string()
            }
            _ => "Falha ao interpretar o corpo JSON.".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Autenticação necessária.".to_string()))
    }
}

/// Best-effort client IP, taken from proxy headers before the socket address.
///
/// Resolves to `None` instead of rejecting: the reporting IP is optional on
/// anonymous submissions.
#[derive(Debug, Clone)]
pub struct ClientIp(pub Option<String>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // X-Forwarded-For carries the original client first when behind a proxy
        let from_forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if let Some(ip) = from_forwarded {
            return Ok(ClientIp(Some(ip)));
        }

        let from_real_ip = parts
            .headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if let Some(ip) = from_real_ip {
            return Ok(ClientIp(Some(ip)));
        }

        let from_socket = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(ClientIp(from_socket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn extract_ip(req: HttpRequest<()>) -> Option<String> {
        let (mut parts, _) = req.into_parts();
        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        ip
    }

    #[tokio::test]
    async fn forwarded_header_takes_first_hop() {
        let req = HttpRequest::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();

        assert_eq!(extract_ip(req).await, Some("203.0.113.7".to_string()));
    }

    #[tokio::test]
    async fn falls_back_to_real_ip_header() {
        let req = HttpRequest::builder()
            .header("x-real-ip", "198.51.100.4")
            .body(())
            .unwrap();

        assert_eq!(extract_ip(req).await, Some("198.51.100.4".to_string()));
    }

    #[tokio::test]
    async fn missing_everything_yields_none() {
        let req = HttpRequest::builder().body(()).unwrap();

        assert_eq!(extract_ip(req).await, None);
    }
}
