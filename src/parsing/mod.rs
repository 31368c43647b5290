//! Resolution of flat operator segments into expression trees.

pub mod expr;
pub mod operator;
pub mod resolver;
pub mod source;

pub use expr::Expr;
pub use operator::{Associativity, Operator, OperatorId, OperatorTable, Precedence};
pub use resolver::{resolve, Resolver, ResolveError, Token, TokenData};
pub use source::Offset;
