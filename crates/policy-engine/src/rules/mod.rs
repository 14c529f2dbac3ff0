pub mod process;
pub mod properties;
pub mod settings;
pub mod work_profile;
