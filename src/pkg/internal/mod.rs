pub mod adaptors;
pub mod admin;
pub mod intake;
pub mod storage;
