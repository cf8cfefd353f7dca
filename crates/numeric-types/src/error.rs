use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumericError {
    #[error("Singular linear system: {0}")]
    Singular(String),

    #[error("Eigensolver did not converge within {max_sweeps} sweeps")]
    NoConvergence { max_sweeps: usize },

    #[error("Underdetermined system: {samples} samples for {unknowns} unknowns")]
    Underdetermined { samples: usize, unknowns: usize },

    #[error("Polynomial has a zero leading coefficient")]
    ZeroLeadingCoefficient,

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
}

pub type NumericResult<T> = Result<T, NumericError>;
