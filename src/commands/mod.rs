pub mod analyze;
pub mod release_info;

pub use analyze::*;
pub use release_info::*;
