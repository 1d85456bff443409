pub mod command;
pub mod descriptor;
pub mod executor;
pub mod lexer;
