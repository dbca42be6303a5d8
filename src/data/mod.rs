// Dataset I/O: loading idea submissions and writing per-row results.

pub mod columns;
pub mod missing;
pub mod table;

pub use columns::ColumnMap;
pub use missing::is_missing;
pub use table::{IdeaTable, OutputColumn};
