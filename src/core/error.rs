use crate::core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("no records available for analysis")]
    EmptyDataset,
    #[error("row {row}: field `{field}` has malformed value {value}")]
    MalformedValue {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("`{quantity}` exceeds the representable decimal range")]
    Overflow { quantity: &'static str },
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl ForecastError {
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, ForecastError::EmptyDataset)
    }
}
