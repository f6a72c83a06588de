/// OpenAPI documentation generation.
pub mod documentation;
/// Session creation and answer verification orchestration.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Leaderboard submission and query orchestration.
pub mod leaderboard_service;
/// Background sweeps over caches, cooldowns and idle sessions.
pub mod maintenance;
/// Metrics summary service.
pub mod metrics_service;
/// Quiz round construction and the answer-commitment signature.
pub mod round;
/// Cached artist search.
pub mod search_service;
/// Playable-track selection.
pub mod selection;
