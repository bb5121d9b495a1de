pub mod geo;
pub mod id;
pub mod name;
pub mod serde;
