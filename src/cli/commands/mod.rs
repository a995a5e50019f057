mod command_result;
pub mod generate;
pub mod init;
pub mod inspect;

pub use command_result::*;
