//! Command implementations for the CLI.

mod info;
mod nginx;

pub use info::cmd_info;
pub use nginx::cmd_nginx;
