pub mod model;
pub mod planner;
pub mod session;
