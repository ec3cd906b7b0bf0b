pub mod attendancemodel;
pub mod groupmodel;
pub mod jobmodel;
pub mod paymentmodel;
pub mod ratingmodel;
pub mod usermodel;
