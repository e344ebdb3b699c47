pub mod color;
pub mod dataset;
pub mod exam;

pub use color::{Color, PALETTE};
pub use dataset::{Dataset, DateIndex, SlotTiming, SlotTimingMap};
pub use exam::{ExamRecord, SelectedExam, StudentInfo};
