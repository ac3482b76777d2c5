// src/gui/actions/mod.rs
pub mod copy;
pub mod export;
pub mod load;
