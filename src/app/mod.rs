//! Run orchestration and result presentation.
mod export;
mod runner;
mod summary;


pub use export::write_result;
pub use runner::{RunCoordinator, RunPhase};
pub use summary::{
    metrics_table_lines, parameter_lines, print_parameters, print_results, status_table_lines,
};
