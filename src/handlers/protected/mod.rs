// handlers/protected/mod.rs - handlers behind jwt_auth_middleware
//
// Each handler receives the caller as an `AuthUser` parameter and hands it
// to the service layer; nothing reads identity from ambient state.
pub mod projects;
pub mod tasks;
