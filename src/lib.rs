pub mod adapters;
pub mod application;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

pub use application::app_error;
pub use application::use_cases;
