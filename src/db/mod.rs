pub mod attendancedb;
pub mod db;
pub mod groupdb;
pub mod jobdb;
pub mod otpdb;
pub mod paymentdb;
pub mod ratingdb;
pub mod userdb;
