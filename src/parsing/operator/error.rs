use super::{OperatorId, Precedence};

use thiserror::Error;

/// A token named an operator which is not in the table. The tokenizer
/// should never produce one, so this always indicates a bug upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No such operator '{id}' in operator table")]
pub struct UnknownOperatorError {
  pub id: OperatorId,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OperatorTableError {
  #[error("Malformed operator table: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Operator '{0}' is declared more than once")]
  DuplicateOperator(String),
  #[error("Operator names must be non-empty")]
  EmptyOperatorName,
  #[error("Juxtaposition must bind tighter than every operator, but '{name}' has precedence {precedence} (juxtaposition has {juxtaposition})")]
  JuxtapositionNotTightest {
    name: String,
    precedence: Precedence,
    juxtaposition: Precedence,
  },
}
