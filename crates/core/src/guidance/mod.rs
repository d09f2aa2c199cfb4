pub mod facing;
pub mod session;
