pub mod role;

pub use role::RoleMiddleware;
