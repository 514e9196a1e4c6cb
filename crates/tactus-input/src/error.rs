use std::fmt;

use crate::types::PointerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Every slot is bound and the pool may not grow any further.
    Exhausted { max: usize },
    /// No live pointer carries this id.
    UnknownPointer(PointerId),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted { max } => {
                write!(f, "pointer pool exhausted ({max} pointers already live)")
            }
            PoolError::UnknownPointer(id) => write!(f, "no live pointer with id {id}"),
        }
    }
}

impl std::error::Error for PoolError {}
