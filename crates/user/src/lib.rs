mod command;
mod password;
mod query;
pub(crate) mod repository;

pub use command::*;
pub use password::*;
pub use query::*;
