mod tuple_space;
pub use tuple_space::*;


/// Opaque payload stored under a key. The engine never looks inside it.
pub type Tuple = String;
