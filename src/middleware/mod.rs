// Response middleware

pub mod cors;

pub use cors::*;
