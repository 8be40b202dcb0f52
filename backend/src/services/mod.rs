//! Business logic services for the Farm Operations Platform

pub mod cultivar;
pub mod grow;
pub mod time_clock;
pub mod worker;

pub use cultivar::CultivarService;
pub use grow::GrowService;
pub use time_clock::TimeClockService;
pub use worker::WorkerService;
