use advent_db::models::result::CompetitionResult;
use advent_db::repositories::TestResultRepo;
use advent_db::DbConfig;
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advent_worker=debug,advent_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DbConfig::from_env().context("Invalid database configuration")?;

    let pool = advent_db::create_pool(&config)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    advent_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    advent_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let user_ids = TestResultRepo::list_user_ids(&pool).await?;
    let mut results = TestResultRepo::list_final_results(&pool).await?;
    tracing::info!(
        users = user_ids.len(),
        results = results.len(),
        "Loaded competition standings"
    );

    // Ranked users first, unranked ones after.
    results.sort_by_key(|r| (r.final_place.is_none(), r.final_place));
    for result in &results {
        report(result);
    }

    pool.close().await;
    Ok(())
}

fn report(result: &CompetitionResult) {
    let weeks: Vec<String> = result
        .weeks()
        .map(|(slot, score)| {
            format!(
                "{slot}: {} pts / place {}",
                fmt_opt(score.points),
                fmt_opt(score.place)
            )
        })
        .collect();

    tracing::info!(
        user_id = %result.user_id,
        final_place = ?result.final_place,
        final_points = ?result.final_points,
        weekly_total = result.weekly_points_total(),
        "{}",
        weeks.join(", ")
    );
}

fn fmt_opt(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
