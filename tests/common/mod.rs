pub mod cli;
pub mod fixtures;

// Re-export commonly used items
pub use cli::{CliOutput, run_cli};
pub use fixtures::{read_image, write_image, write_filled};
