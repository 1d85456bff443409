pub mod connector;
pub mod process;
