/// Database models for the helpdesk
///
/// This module contains the database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Helpdesk agents and their profile tag
/// - `queue`: Routing buckets tickets are assigned to
/// - `user_queue`: Many-to-many assignment of users to queues

pub mod queue;
pub mod user;
pub mod user_queue;
