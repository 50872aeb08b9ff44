//! Shared UI for the workspace: the session and todo hooks that bind the
//! client core to signals, and the presentational components. Components
//! here render state and forward user intents upward; the stores in the
//! `store` crate are the only writers.

mod client;
pub use client::{ServerAuthApi, ServerTodoApi};

mod session;
pub use session::{cookie_settle_delay, use_session, SessionHandle, SessionProvider};

mod todos;
pub use todos::{use_todos, TodosHandle};

mod navbar;
pub use navbar::Navbar;

mod todo_item;
pub use todo_item::TodoItem;

mod todo_form;
pub use todo_form::TodoForm;

mod filter_tabs;
pub use filter_tabs::FilterTabs;
