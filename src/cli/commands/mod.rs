pub mod check;
pub mod context;
pub mod fix;
pub mod init;
