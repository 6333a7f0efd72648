mod games;
mod health;
mod maps;
mod players;
mod points;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` - lightweight liveness check
/// - `/api/v1/health` - health check with database connectivity
/// - `/api/v1/games/...` - lifecycle, players, infections, maps of a game
/// - `/api/v1/maps/...` - maps and their supplies, safezones and missions
pub fn router() -> Router<AppState> {
    let game_scoped = Router::new()
        .merge(players::router())
        .merge(maps::game_router());

    let map_scoped = maps::router().nest("/{map_id}", points::router());

    let api_v1 = Router::new()
        .merge(health::api_router())
        .nest("/games", games::router())
        .nest("/games/{id}", game_scoped)
        .nest("/maps", map_scoped);

    Router::new()
        .merge(health::root_router())
        .nest("/api/v1", api_v1)
}
