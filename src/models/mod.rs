pub mod driver;
pub mod location;

pub use driver::Driver;
pub use location::LocationSample;
