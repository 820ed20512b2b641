mod handler;
pub mod model;

pub use handler::{book, list_bookings};
