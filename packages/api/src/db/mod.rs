//! PostgreSQL connection pool, shared by every server function.
//!
//! The pool is a lazy process-wide singleton: the first [`get_pool`] call
//! reads `DATABASE_URL` (via `dotenvy`) and opens the pool; later callers
//! get the cached handle.

mod pool;

pub use pool::get_pool;
