//! Semantic-analysis errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SemaError {
    #[error("assignment target must be a symbol, array index, or field access, found {found}")]
    BadAssignmentTarget { found: &'static str },

    #[error("condition must be a value-producing expression, found {found}")]
    BadConditionShape { found: &'static str },

    #[error("call argument must be a value-producing expression, found {found}")]
    BadArgumentShape { found: &'static str },

    #[error("nested lambda declarations are not allowed")]
    NestedLambda,

    #[error("`for` init must be an assignment, found {found}")]
    BadForInit { found: &'static str },

    #[error("`for` step must be a unary or binary expression, found {found}")]
    BadForStep { found: &'static str },
}
