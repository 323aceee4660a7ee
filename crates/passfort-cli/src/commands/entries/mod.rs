//! Entry commands: add, list, show, delete, export.

mod add;
mod delete;
mod export;
mod list;
mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use export::handle_export;
pub use list::handle_list;
pub use show::handle_show;
