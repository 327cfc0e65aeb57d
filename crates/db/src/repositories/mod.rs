pub mod booking_repo;
pub mod client_repo;

pub use booking_repo::BookingRepo;
pub use client_repo::ClientRepo;
