pub mod currency;
pub mod otp_generator;
pub mod token;
