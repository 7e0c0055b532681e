pub mod card_ctx;
pub mod card_flow;

pub use card_ctx::CardCtx;
pub use card_flow::GradeCardFlow;
