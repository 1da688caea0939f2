pub mod asset_dirs;
pub mod icon_manifest;
pub mod output_listing;
pub mod placeholder;
pub mod raster_image;

// --- public re-exports ---
pub use asset_dirs::asset_layout::AssetLayout;
pub use asset_dirs::directory_path::DirectoryPath;
pub use asset_dirs::path_error::PathError;
pub use icon_manifest::{ManifestEntry, ICON_MANIFEST};
pub use output_listing::OutputListing;
pub use raster_image::{RasterImage, RasterValidationError};
