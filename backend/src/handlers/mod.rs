//! HTTP handlers for the Farm Operations Platform

mod cultivar;
mod grow;
mod harvest;
mod health;
mod time_clock;
mod worker;

pub use cultivar::*;
pub use grow::*;
pub use harvest::*;
pub use health::*;
pub use time_clock::*;
pub use worker::*;
