//! arplanes-demo: scripted plane-tracking session
//!
//! Connects the simulated device to a plane registry, replays a short
//! session (planes found, grown and lost, with taps placing models), then
//! reports the resulting scene as a terminal overlay or JSON.

pub mod overlay;
pub mod script;
pub mod session;

pub use overlay::render_overlay;
pub use script::{demo_script, Step};
pub use session::{PlaneSummary, Session, SessionSnapshot};
