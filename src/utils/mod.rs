pub mod colors;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use time::time_to_minutes;
