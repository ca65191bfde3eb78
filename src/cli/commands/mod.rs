mod build;
mod navigate;

pub use build::handle_build_command;
pub use navigate::handle_navigate_command;
