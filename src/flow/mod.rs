pub mod artifact;
pub mod definition;
pub mod template;

pub use artifact::*;
pub use definition::*;
pub use template::*;
