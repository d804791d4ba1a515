mod assertions;
mod fixtures;

// Re-export
pub use assertions::{assert_altitude_at_least, assert_altitude_at_most};
pub use fixtures::*;
