pub mod badge;
pub mod fields;
pub mod filter_bar;
pub mod layout;
pub mod modal;
pub mod pagination;
pub mod states;
pub mod table;
pub mod toast_host;
