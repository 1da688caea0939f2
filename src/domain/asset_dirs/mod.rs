pub mod asset_layout;
pub mod directory_path;
pub mod path_error;
