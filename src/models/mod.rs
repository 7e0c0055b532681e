pub mod grade_card;
pub mod result_link;

pub use grade_card::{CaptureOutcome, GradeCard};
pub use result_link::{AnchorInfo, ResultLink};
