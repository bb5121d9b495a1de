pub mod camera;
pub mod catchment;
pub mod coordinate;
pub mod distance;
pub mod facility;
pub mod outfall;
pub mod path;

/// Provides a small, realistic instance of a type, used by tests and API
/// documentation.
pub trait ExampleData {
    fn example_data() -> Self;
}
