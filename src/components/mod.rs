//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod file_picker;
mod nav_bar;
mod progress_panel;
mod quota_form;
mod text_field;
mod toast;

pub use delete_confirm_button::DeleteConfirmButton;
pub use file_picker::FilePicker;
pub use nav_bar::NavBar;
pub use progress_panel::ProgressPanel;
pub use quota_form::QuotaForm;
pub use text_field::TextField;
pub use toast::ToastHost;
