//! Domain models for the Farm Operations Platform

mod cultivar;
mod growing_days;
mod harvest;
mod time_clock;
mod worker;

pub use cultivar::*;
pub use growing_days::*;
pub use harvest::*;
pub use time_clock::*;
pub use worker::*;
