mod builder;
mod linda;
mod node;

pub use builder::*;
pub use linda::*;
pub use node::*;
