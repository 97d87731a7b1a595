// Domain error taxonomy
use super::statistics::Field;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    /// A statistics operation was invoked on a dataset with no usable records
    #[error("cannot compute {field} statistics over an empty dataset")]
    EmptyDataset { field: Field },

    /// A ratio whose denominator is zero
    #[error("{quantity} is undefined: denominator is zero")]
    DivisionByZero { quantity: &'static str },

    #[error("dataset {0} is already selected in the other slot")]
    SameDataset(i64),

    #[error("invalid comparison slot {0}, expected 1 or 2")]
    InvalidSlot(u8),
}
