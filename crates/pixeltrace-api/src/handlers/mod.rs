//! Route handlers.

pub mod collect;
pub mod data;
pub mod health;
pub mod landing;
pub mod pixel;
pub mod script;
