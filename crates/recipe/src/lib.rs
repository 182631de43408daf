mod command;
mod image;
mod input;
mod query;
mod relation;

pub use command::*;
pub use image::*;
pub use input::*;
pub use query::*;
pub use relation::*;
