pub mod backup;
pub mod day;
pub mod init;
pub mod restore;
pub mod root;
pub mod tasks;
