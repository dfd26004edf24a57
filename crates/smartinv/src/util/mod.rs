pub mod format;
pub mod process;
pub mod progress;

pub use format::{format_bytes, or_dash};
pub use process::{run_command, CommandOutput};
pub use progress::create_spinner;
