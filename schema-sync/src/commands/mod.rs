mod diff;

// Diff commands
pub use diff::{render_output, run_diff};
