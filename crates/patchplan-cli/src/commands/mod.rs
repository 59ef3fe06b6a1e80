pub mod diff;
pub mod kinds;
