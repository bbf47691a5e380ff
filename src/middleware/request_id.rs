use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Correlation id attached to every request, echoed back in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Middleware factory
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddlewareService { service }))
    }
}

pub struct RequestIdMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Reuse the caller's id when it is a usable header value
        let header_value = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .filter(|h| h.to_str().is_ok_and(|s| !s.trim().is_empty()))
            .cloned()
            .unwrap_or_else(generate_header_value);

        let correlation_id = CorrelationId(header_value.to_str().unwrap_or_default().to_string());
        req.extensions_mut().insert(correlation_id);

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            res.headers_mut()
                .insert(HeaderName::from_static(CORRELATION_ID_HEADER), header_value);

            Ok(res)
        })
    }
}

fn generate_header_value() -> HeaderValue {
    // A hyphenated uuid is always a valid header value
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

// Extension trait to easily get correlation ID from request
pub trait RequestIdExt {
    fn correlation_id(&self) -> String;
}

impl RequestIdExt for actix_web::HttpRequest {
    fn correlation_id(&self) -> String {
        self.extensions()
            .get::<CorrelationId>()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string())
    }
}

impl RequestIdExt for ServiceRequest {
    fn correlation_id(&self) -> String {
        self.extensions()
            .get::<CorrelationId>()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string())
    }
}
