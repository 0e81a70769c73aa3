//! Display engine errors

/// Errors returned by [`DisplayEngine`](crate::DisplayEngine) operations
///
/// `E` is the bus error of the underlying panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError<E> {
    /// The panel rejected a transaction
    #[error("display bus error: {0:?}")]
    Bus(E),
    /// Page index is not below the page count
    #[error("page {index} out of range (engine has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
}

impl<E> From<E> for EngineError<E> {
    fn from(err: E) -> Self {
        EngineError::Bus(err)
    }
}
