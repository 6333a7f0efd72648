pub mod game;
pub mod map;
pub mod player;
pub mod point;

pub use game::{
    AdvanceGameRequest, CreateGameRequest, GameDetailsResponse, GamePhaseResponse, GameResponse,
    UpdateGameRequest,
};
pub use map::{CreateMapRequest, MapResponse, UpdateMapRequest};
pub use player::{
    AssignSquadRequest, FactionResponse, InfectRequest, InfectionResponse, PlayerFilter,
    PlayerResponse, PlayersListResponse, RegisterPlayerRequest, RegisteredPlayerResponse,
    UpdatePositionRequest,
};
pub use point::{CreatePointRequest, PointResponse, PointsListResponse, UpdatePointRequest};
