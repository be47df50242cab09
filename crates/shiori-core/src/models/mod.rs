mod account;
mod status;

pub use account::{Account, StatusEntry, StatusMap};
pub use status::StatusLabel;
