mod root;
mod schema;
mod show;

pub use root::Cli;
