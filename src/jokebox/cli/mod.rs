mod commands;
mod print;
mod session;

pub use commands::run;
