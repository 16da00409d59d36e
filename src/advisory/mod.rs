/// Advisory layer: everything a counselor sees beyond the bare prediction.
///
/// All three modules work from the raw record (plus, for explanations, the
/// prediction being described) and never feed back into the classifier.
pub mod explain;
pub mod recommend;
pub mod warning;

pub use explain::explain;
pub use recommend::recommend;
pub use warning::{detect_trends, rank_priority, urgency_score};
