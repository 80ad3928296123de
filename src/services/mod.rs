pub mod api_client;
pub mod geolocation;
pub mod navigation;
pub mod toast_service;

pub use api_client::{ApiClient, DriverApi};
pub use geolocation::{DeviceGeolocation, GeoError, LocationSource};
pub use navigation::{BrowserNavigate, Navigate};
pub use toast_service::{Notifier, ToastService};
