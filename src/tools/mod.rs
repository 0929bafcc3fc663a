pub mod search;
pub mod set_index;
pub mod status;

pub use search::*;
pub use set_index::*;
pub use status::*;
