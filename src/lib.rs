// lib.rs
pub mod commands;
pub mod labels;
pub mod multiway;
pub mod pairwise;
pub mod report;
pub mod residue;
