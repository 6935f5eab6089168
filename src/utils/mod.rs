pub mod paths;
pub mod text;

pub use paths::*;
pub use text::{remaining, truncate, truncate_with_ellipsis, weight, ELLIPSIS};
