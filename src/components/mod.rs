pub mod app;
pub mod layout;
pub mod toast_list;
pub mod image_picker;
pub mod form_field;
pub mod spinner;
pub mod modal;

pub use app::App;
pub use layout::Layout;
pub use toast_list::ToastList;
pub use image_picker::ImagePicker;
pub use form_field::{errors_of, field_error, input_value, non_empty, SelectField, TextAreaField, TextField};
pub use spinner::Spinner;
pub use modal::Modal;
