// src/lib.rs
pub mod data {
    pub mod meta;
    pub mod dataset;
    pub mod handle;
}
