use crate::RequestId;

/// Side effects requested by `update`; the caller executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the analysis service once. Its settlement must come back as
    /// `Msg::AnalysisSettled` carrying the same `request_id`.
    Analyze {
        request_id: RequestId,
        query: String,
        profile: String,
    },
}
