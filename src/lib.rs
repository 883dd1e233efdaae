pub mod comparator;
pub mod config;
pub mod error;
pub mod logging;
pub mod messages;
pub mod ui;

pub use comparator::{
    compare, ComparisonResult, Field, Outcome, PriceComparator, ProductEntry, UnitPrice,
};
pub use error::AppError;
pub use logging::{init_tracing, LogTarget};
