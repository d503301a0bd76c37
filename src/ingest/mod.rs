pub mod header;
pub mod loader;
pub mod rows;

pub use header::{locate_header, HeaderCandidate};
pub use loader::{load_lines, LABEL_PREFIX};
pub use rows::{materialize, Record, Table};
