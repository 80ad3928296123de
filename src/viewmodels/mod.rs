pub mod driver_viewmodel;
pub mod tracking_viewmodel;

pub use driver_viewmodel::DriverGuard;
pub use tracking_viewmodel::TrackingViewModel;
