pub mod assembler;
pub mod normalizer;
pub mod ranker;
pub mod recommendations;
pub mod resolver;
