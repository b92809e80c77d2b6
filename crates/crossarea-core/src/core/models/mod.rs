//! Data models describing the rigid structure being measured.

pub mod atom_set;
