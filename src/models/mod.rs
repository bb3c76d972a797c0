//! Data models

mod catalog;
mod display;
mod event;
mod fact;
mod node;
mod report;
mod resource;

pub use catalog::*;
pub use display::*;
pub use event::*;
pub use fact::*;
pub use node::*;
pub use report::*;
pub use resource::*;
