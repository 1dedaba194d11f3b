pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod dialog;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod search_bar;
pub mod skeleton;

// Re-exports for convenience
pub use alert::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use dialog::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
pub use skeleton::*;
