pub mod game_service;
pub mod map_service;
pub mod player_service;
pub mod point_service;

pub use game_service::GameService;
pub use map_service::MapService;
pub use player_service::PlayerService;
pub use point_service::PointService;
