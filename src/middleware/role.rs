use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::auth::jwt::validate_jwt_from_request;
use crate::error::ApiError;
use crate::models::user::UserRole;

/// Rejects requests whose bearer token does not carry one of the allowed
/// roles. Validated claims are stored in the request extensions.
#[derive(Clone)]
pub struct RoleMiddleware {
    allowed: Rc<[UserRole]>,
}

impl RoleMiddleware {
    pub fn new(allowed: &[UserRole]) -> Self {
        Self { allowed: allowed.into() }
    }

    pub fn staff() -> Self {
        Self::new(&[UserRole::Admin, UserRole::Referee])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleMiddlewareService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RoleMiddlewareService<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RoleMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let claims = match validate_jwt_from_request(req.request()) {
            Ok(claims) => claims,
            Err(e) => return Box::pin(async move { Err(e.into()) }),
        };

        if !self.allowed.contains(&claims.role) {
            tracing::warn!(
                "User {} (role: {}) attempted to access {}",
                claims.email,
                claims.role,
                req.path()
            );
            return Box::pin(async move {
                Err(ApiError::forbidden("Insufficient privileges").into())
            });
        }

        req.extensions_mut().insert(claims);

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}
