pub mod clique;
pub mod compare;
pub mod dmat;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod score;
pub mod viz;
