//! Query assembler (verb module)
//!
//! Report config + request → [`CompiledQuery`](crate::compiled::CompiledQuery).

mod assemble;
mod order;

pub use assemble::{assemble, assemble_with, QueryAssembler};
pub use order::{OrderBy, SortDirection};
