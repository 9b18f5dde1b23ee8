//! One module per subcommand.

mod marker;
mod o_count;

pub use marker::run_marker;
pub use o_count::run_o_count;
