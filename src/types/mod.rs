// ABOUTME: Validated domain types for Azure resource names and endpoints.
// ABOUTME: Construction fails early so invalid names never reach the cloud client.

mod app_name;
mod endpoint;
mod image_ref;
mod registry_name;

pub use app_name::{AppName, AppNameError};
pub use endpoint::Endpoint;
pub use image_ref::{ImageRef, ImageTagError};
pub use registry_name::{RegistryName, RegistryNameError};
