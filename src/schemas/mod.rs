pub mod document;
pub use document::*;

pub mod messages;
pub use messages::*;

pub mod retrievers;
pub use retrievers::*;
