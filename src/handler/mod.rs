pub mod attendance;
pub mod auth;
pub mod groups;
pub mod jobs;
pub mod payments;
pub mod ratings;
pub mod stream;
pub mod users;
