//! Client-side core for Taskpin: the todo cache, the session store, and the
//! dashboard display logic, all independent of any UI framework.
//!
//! The network is reached only through the [`TodoApi`] and [`AuthApi`] trait
//! seams, so the whole crate is testable against the in-memory [`MemoryApi`].

mod api;
mod display;
mod memory;
mod model;
mod session;
mod todos;

pub use api::{ApiError, AuthApi, TodoApi};
pub use display::{partition_for_display, FilterTab};
pub use memory::{FailPoint, MemoryApi};
pub use model::{Account, Todo, TodoDraft, TodoPatch};
pub use session::{Session, SessionStore};
pub use todos::{StoreError, TodoStore, TEMP_ID_PREFIX};
