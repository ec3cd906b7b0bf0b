pub mod attendance_service;
pub mod error;
pub mod group_service;
pub mod job_service;
pub mod rating_service;
pub mod settlement_service;
