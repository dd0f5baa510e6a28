mod character_splitter;
mod error;
mod splitter;
mod token_splitter;

pub use character_splitter::*;
pub use error::*;
pub use splitter::*;
pub use token_splitter::*;
