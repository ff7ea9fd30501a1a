pub mod table;

pub use table::TrainingTable;
