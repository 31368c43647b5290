//! Loading operator tables from JSON.
//!
//! A table is a versionable artifact, supplied once per compilation
//! context. Its on-disk form is
//!
//! ```text
//! {
//!   "juxtaposition": 100,
//!   "operators": [
//!     { "name": "+", "precedence": 7, "associativity": "left" }
//!   ]
//! }
//! ```

use super::{Operator, OperatorTable};
use super::associativity::Associativity;
use super::precedence::Precedence;
use super::error::OperatorTableError;

use serde::{Serialize, Deserialize};

use std::collections::HashSet;
use std::io::Read;

/// Serialized form of an [`OperatorTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorTableConfig {
  /// Precedence of the juxtaposition operator. Its associativity is
  /// always left and cannot be configured.
  pub juxtaposition: Precedence,
  #[serde(default)]
  pub operators: Vec<OperatorConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorConfig {
  pub name: String,
  pub precedence: Precedence,
  pub associativity: Associativity,
}

impl OperatorTableConfig {
  /// Builds the table, rejecting duplicate or empty names and tables
  /// in which juxtaposition is not the tightest operator.
  pub fn into_table(self) -> Result<OperatorTable, OperatorTableError> {
    let mut seen = HashSet::with_capacity(self.operators.len());
    let mut table = OperatorTable::with_capacity(self.juxtaposition, self.operators.len());
    for op in self.operators {
      if op.name.is_empty() {
        return Err(OperatorTableError::EmptyOperatorName);
      }
      if !seen.insert(op.name.clone()) {
        return Err(OperatorTableError::DuplicateOperator(op.name));
      }
      table.insert(Operator::new(op.name, op.associativity, op.precedence));
    }
    table.validate()?;
    log::debug!("Loaded operator table with {} operators", table.len());
    Ok(table)
  }
}

impl From<&OperatorTable> for OperatorTableConfig {
  fn from(table: &OperatorTable) -> Self {
    let mut operators: Vec<OperatorConfig> = table.iter().map(|op| OperatorConfig {
      name: op.id().as_str().to_owned(),
      precedence: op.precedence(),
      associativity: op.associativity(),
    }).collect();
    operators.sort_by(|a, b| a.name.cmp(&b.name));
    OperatorTableConfig {
      juxtaposition: table.juxtaposition().precedence(),
      operators,
    }
  }
}

impl OperatorTable {
  pub fn from_json_str(json: &str) -> Result<OperatorTable, OperatorTableError> {
    let config: OperatorTableConfig = serde_json::from_str(json)?;
    config.into_table()
  }

  pub fn from_reader(reader: impl Read) -> Result<OperatorTable, OperatorTableError> {
    let config: OperatorTableConfig = serde_json::from_reader(reader)?;
    config.into_table()
  }

  /// Serializes the table to JSON, in the same format accepted by
  /// [`OperatorTable::from_json_str`]. Operators are sorted by name.
  pub fn to_json_string(&self) -> Result<String, OperatorTableError> {
    Ok(serde_json::to_string_pretty(&OperatorTableConfig::from(self))?)
  }
}
