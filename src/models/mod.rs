pub mod booking;
pub mod confirmation;
