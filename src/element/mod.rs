pub mod compat;
pub mod dom;
pub mod element_model;
pub mod visual;
