use thiserror::Error;

/// Error reported by a right-hand side or other caller supplied function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Possible error conditions that may arise during integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {param}")]
    InvalidParameter { param: String },
    #[error("division by zero: none of the {samples} sample points lie inside the region")]
    EmptyRegion { samples: usize },
    #[error("Error in `derive` method")]
    External(#[from] BoxError),
}

// Subdivision counts must be at least one, otherwise the step size divides by zero.
pub(crate) fn check_subdivisions(name: &str, n: usize) -> Result<(), Error> {
    if n == 0 {
        return Err(Error::InvalidParameter {
            param: format!("{name}: {n}"),
        });
    }
    Ok(())
}
