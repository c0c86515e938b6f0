pub mod url_param;
pub mod url_state;
pub mod controller_settings;
