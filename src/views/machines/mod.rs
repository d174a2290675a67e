pub mod list;
pub mod form;
pub mod detail;

pub use list::MachinesPage;
pub use form::MachineFormModal;
pub use detail::MachineDetailPage;
