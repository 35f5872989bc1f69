//! Domain types shared between the city client and its front ends.

pub mod domain;
pub mod error;
