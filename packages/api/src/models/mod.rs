//! Database row models and their projections onto the wire types.

mod todo;
mod user;

pub use todo::TodoRow;
pub use user::User;
