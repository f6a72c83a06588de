use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Preview Quiz Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::create_session,
        crate::routes::game::submit_answer,
        crate::routes::leaderboard::submit_score,
        crate::routes::leaderboard::top_scores,
        crate::routes::artists::search_artists,
        crate::routes::metrics::metrics_summary,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::CreateSessionRequest,
            crate::dto::game::SessionResponse,
            crate::dto::game::RoundDto,
            crate::dto::game::ChoiceDto,
            crate::dto::game::AnswerRequest,
            crate::dto::game::AnswerResponse,
            crate::dto::leaderboard::SubmitScoreRequest,
            crate::dto::leaderboard::SubmitScoreResponse,
            crate::dto::leaderboard::TopScoresResponse,
            crate::dto::leaderboard::LeaderboardEntryDto,
            crate::dto::search::SearchResponse,
            crate::dto::metrics::MetricsSummary,
            crate::state::game::GameMode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Session and round lifecycle"),
        (name = "leaderboard", description = "Score submission and rankings"),
        (name = "artists", description = "Catalog artist search"),
        (name = "metrics", description = "Game metrics counters"),
    )
)]
pub struct ApiDoc;
