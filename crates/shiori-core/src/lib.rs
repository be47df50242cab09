pub mod accounts;
pub mod browse;
pub mod config;
pub mod credential;
pub mod error;
pub mod list;
pub mod models;
pub mod session;

#[cfg(test)]
mod test_support;
