pub mod http;
pub mod payment;
pub mod persistence;
