// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod app_state;
pub mod driver_state;
pub mod tracking_state;

pub use app_state::*;
pub use driver_state::*;
pub use tracking_state::*;
