mod history;
mod init;
mod serve;

pub use history::cmd_history;
pub use init::cmd_init;
pub use serve::cmd_serve;
