use std::fmt::{self, Display, Formatter};

/// Thin wrapper around `usize` that represents the width of the
/// whitespace immediately preceding a token in the source.
///
/// Offsets are carried through resolution untouched so that later
/// stages can rebuild text spans. They never affect how a segment is
/// grouped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(pub usize);

impl Offset {
  pub const ZERO: Offset = Offset(0);
}

impl From<usize> for Offset {
  fn from(i: usize) -> Self {
    Offset(i)
  }
}

/// Writes the offset as that many spaces.
impl Display for Offset {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:width$}", "", width = self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_offset_display_is_spaces() {
    assert_eq!(Offset(0).to_string(), "");
    assert_eq!(Offset(3).to_string(), "   ");
  }
}
