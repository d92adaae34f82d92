/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (login, refresh)
/// - `users`: Show and update users
/// - `queues`: List queues

pub mod auth;
pub mod health;
pub mod queues;
pub mod users;
