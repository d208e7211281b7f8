pub mod avatars;
pub mod build;
pub mod util;
pub mod validate;

pub use avatars::*;
pub use build::*;
pub use util::*;
pub use validate::*;
