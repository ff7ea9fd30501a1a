pub mod finite_diff;
pub mod loop_fn;
pub mod train_config;
pub mod train_report;

pub use finite_diff::{estimate_gradient, estimate_gradient_par};
pub use loop_fn::train_loop;
pub use train_config::TrainConfig;
pub use train_report::TrainReport;
