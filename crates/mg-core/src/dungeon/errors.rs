//! Generator error taxonomy.
//!
//! Only two things are hard failures: a configuration that is wrong on its
//! face, and a connectivity requirement that provably cannot be met within
//! the retry budget. Every other miss (a placement attempt, a door pair with
//! no route, a colliding portal point) is an `Option`-level retry.

use thiserror::Error;

/// Hard generation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("infeasible configuration: {reason}")]
    Infeasible { reason: String },
}
