use chrono::Utc;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wellness_goals::{
    config::{self, directory::Directory},
    core::{
        activity::{ActivityCatalog, get_all_activities, leaderboard, seed_activities, user_progress},
        goal::seed_goals,
        report::{
            format_goal_line, format_leaderboard, format_points_summary, format_team_rollup,
            format_user_summary,
        },
        rollup::manager_rollup,
        stats::aggregate_stats,
        store::GoalStore,
    },
    errors::Result,
};

/// Number of open goals listed under the user summary
const UPCOMING_GOAL_LIMIT: usize = 2;
/// Number of leaderboard rows printed
const LEADERBOARD_LIMIT: usize = 5;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load goal fixtures and the team directory
    let fixtures = config::goals::load_default_config()
        .inspect_err(|e| error!("Failed to load goal fixtures: {}", e))?;
    let directory = Directory::from_config(&fixtures);
    let catalog = ActivityCatalog::new(fixtures.activity_types.clone());
    info!(
        "Loaded {} users, {} teams, {} goal fixtures and {} activity types.",
        fixtures.users.len(),
        fixtures.teams.len(),
        fixtures.goals.len(),
        catalog.types().len()
    );

    // 4. Connect to the database and seed missing goals and activities
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;
    seed_goals(&db, &fixtures.goals, Utc::now())
        .await
        .inspect_err(|e| error!("Failed to seed goals: {}", e))?;
    seed_activities(&db, &catalog, &fixtures.activities)
        .await
        .inspect_err(|e| error!("Failed to seed activities: {}", e))?;

    // 5. Build the goal store and read the activity log once
    let store = GoalStore::load(&db).await?;
    let activities = get_all_activities(&db).await?;

    // 6. Render the dashboard for the configured user
    let user_id = std::env::var("DASHBOARD_USER_ID").unwrap_or_else(|_| "1".to_string());

    let stats = aggregate_stats(&store, &user_id);
    println!("{}", format_user_summary(&stats, &directory.display_name(&user_id)));

    let upcoming = store.upcoming_goals(&user_id, UPCOMING_GOAL_LIMIT);
    if !upcoming.is_empty() {
        println!("Upcoming goals");
        for goal in upcoming {
            println!("  {}", format_goal_line(goal));
        }
        println!();
    }

    if directory.is_manager(&user_id) {
        let rollup = manager_rollup(&store, &directory, &user_id);
        println!(
            "{}",
            format_team_rollup(&rollup, |id| directory.display_name(id))
        );
    }

    let board = leaderboard(&activities, &fixtures.users);
    let rank = board
        .iter()
        .find(|entry| entry.user_id == user_id)
        .map(|entry| entry.rank);
    let progress = user_progress(&activities, &user_id, Utc::now().date_naive());
    println!("{}", format_points_summary(&progress, rank));
    println!("{}", format_leaderboard(&board, LEADERBOARD_LIMIT));

    Ok(())
}
