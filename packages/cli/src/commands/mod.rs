pub mod compile;
pub mod import;
pub mod init;

pub use compile::{compile, CompileArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};
