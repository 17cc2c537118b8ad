pub mod detect;
pub mod languages;
pub mod review;
pub mod session;
