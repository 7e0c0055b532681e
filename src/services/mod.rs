pub mod link_enumerator;
pub mod popup_watcher;
pub mod record_matcher;
pub mod report_saver;

pub use link_enumerator::LinkEnumerator;
pub use popup_watcher::PopupWatcher;
pub use record_matcher::{RecordMatcher, RollNumberMatcher};
pub use report_saver::ReportSaver;
