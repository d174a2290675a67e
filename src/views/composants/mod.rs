pub mod list;
pub mod form;

pub use list::ComposantsPage;
pub use form::ComposantFormModal;
