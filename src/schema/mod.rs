pub mod alias;
pub mod normalizer;

pub use alias::{resolve, AliasTable};
pub use normalizer::Normalizer;
