pub mod booking;
pub mod notification;
pub mod photographer;
pub mod review;
