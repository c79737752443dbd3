pub mod geometry;
pub mod model;
pub mod physics;
pub mod resolve;
pub mod sectors;

pub use geometry::{Point, PointerId, normalize_degrees, pointer_angle, shortest_delta};
pub use model::{WheelAction, WheelModel};
pub use physics::{Phase, PhysicsError, PhysicsParams, RotationEngine, RotationState};
pub use resolve::{resolve, resolve_index, target_angle};
pub use sectors::{FlatSector, SectorMap};
