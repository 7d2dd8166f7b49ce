pub mod balance;
pub mod error;
pub mod interval;
pub mod subscription;
pub mod transaction;
