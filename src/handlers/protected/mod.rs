pub mod files;
pub mod resources;
