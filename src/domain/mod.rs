//! Domain layer

pub mod call;
pub mod shared;
