// Shared domain types — used by both the fetcher layer and the filter core.
// Neither layer depends on the other; both import from this module.

pub mod common;
pub mod issue;
pub mod pr;
pub mod tag;

pub use common::*;
pub use issue::*;
pub use pr::*;
pub use tag::*;
