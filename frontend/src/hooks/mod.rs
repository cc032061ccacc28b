pub mod sources;
pub mod use_app;
pub mod use_detail;
pub mod use_form;
pub mod use_list;
pub mod use_options;

pub use sources::{CustomerInteractions, CustomerLoans, DetailSource, ListSource, LoanPayments};
pub use use_app::use_app;
pub use use_detail::{use_detail, UseDetailResult};
pub use use_form::{use_edit_form, use_form, Binding, FieldSet, UseFormResult};
pub use use_list::{use_list, UseListResult};
pub use use_options::use_options;
