use crate::parsing::operator::OperatorTableError;
use crate::parsing::resolver::ResolveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  ResolveError(#[from] ResolveError),
  #[error("{0}")]
  OperatorTableError(#[from] OperatorTableError),
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::{resolve, OperatorTable, Token};

  #[test]
  fn test_resolve_error_converts() {
    let err: Error = resolve::<&str, _>(OperatorTable::common(), vec![]).unwrap_err().into();
    assert!(matches!(err, Error::ResolveError(ResolveError::EmptySegment)));
    assert_eq!(err.to_string(), "Cannot resolve an empty segment");
  }

  #[test]
  fn test_table_error_converts() {
    let err: Error = OperatorTable::from_json_str("[]").unwrap_err().into();
    assert!(matches!(err, Error::OperatorTableError(_)));
  }

  #[test]
  fn test_question_mark_propagation() {
    fn load_and_resolve(json: &str) -> Result<String, Error> {
      let table = OperatorTable::from_json_str(json)?;
      let expr = resolve(&table, vec![Token::atom("a", 0), Token::operator("+", 1)])?;
      Ok(expr.to_string())
    }
    let json = r#"{ "juxtaposition": 2, "operators": [{ "name": "+", "precedence": 1, "associativity": "left" }] }"#;
    assert_eq!(load_and_resolve(json).unwrap(), "a +");
    assert!(load_and_resolve(r#"{ "juxtaposition": 2 }"#).is_err());
  }
}
