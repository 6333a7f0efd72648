//! Game rules, independent of storage and transport.
//!
//! Everything in here is pure: callers pass the current instant explicitly,
//! so every temporal decision is deterministic.

pub mod bite_code;
pub mod error;
pub mod faction;
pub mod geo;
pub mod phase;
pub mod point;
pub mod visibility;
pub mod window;

pub use bite_code::{generate_bite_code, is_valid_bite_code, normalize_bite_code};
pub use error::GameError;
pub use faction::Faction;
pub use geo::{Geofence, Position};
pub use phase::GamePhase;
pub use point::{DropKind, PoiKind, PointFields};
pub use visibility::{
    Actor, FactionVisibility, PointOfInterest, is_candidate_for, is_visible_to, list_visible,
};
pub use window::TimeWindow;
