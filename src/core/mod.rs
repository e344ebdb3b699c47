pub mod convert;
pub mod loader;
pub mod search;
pub mod session;
pub mod slot;
pub mod timetable;

pub use search::{SearchMode, SearchOutcome, StudentSelection, Suggestion};
pub use session::{AppState, ExamUpdate};
pub use timetable::{Timetable, TimingPair, Unresolved, UnresolvedReason};
