//! Progress reporting while a completion call is in flight

pub mod reporter;
