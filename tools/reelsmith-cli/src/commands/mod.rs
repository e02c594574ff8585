pub mod check;
pub mod init;
pub mod process;
pub mod queue;
pub mod render;
