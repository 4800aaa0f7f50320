//! Command-line front end: builds one workout against a seeded in-memory
//! catalog and renders it as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use datastream_workouts::views::WorkoutView;
use datastream_workouts::{
    Config, CreateWorkoutSubmission, ExerciseDefinitionService, InMemoryStore, UserId,
    WorkoutService,
};

pub mod catalog;
pub mod error;

pub use error::{CliError, CliResult};

use catalog::{CatalogSeed, SeededCatalog};

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub catalog_path: PathBuf,
    pub user: UserId,
    pub workouts: Config,
}

impl CliConfig {
    pub fn from_env() -> CliResult<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> CliResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let catalog_path = get("DATASTREAM_CATALOG")
            .map(PathBuf::from)
            .ok_or_else(|| CliError::Config("DATASTREAM_CATALOG missing".into()))?;
        let user = match get("DATASTREAM_USER_ID") {
            None => UserId(1),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(UserId)
                .map_err(|_| CliError::Config(format!("DATASTREAM_USER_ID invalid: {raw}")))?,
        };
        let workouts = Config::from_env_with(&mut get)?;
        Ok(Self {
            catalog_path,
            user,
            workouts,
        })
    }
}

struct Seeded {
    workouts: WorkoutService,
    catalog: SeededCatalog,
}

async fn seed_store(config: &CliConfig) -> CliResult<Seeded> {
    let raw_catalog = tokio::fs::read_to_string(&config.catalog_path).await?;
    let seed = CatalogSeed::from_json(&raw_catalog)?;

    let store = Arc::new(InMemoryStore::default());
    let workouts = WorkoutService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        config.workouts.clone(),
    );
    let definitions = ExerciseDefinitionService::new(store.clone(), store);
    let catalog = seed.apply(&workouts, &definitions).await?;
    tracing::info!(
        "datastream_cli: seeded {} workout types and {} exercise definitions",
        catalog.workout_types.len(),
        catalog.exercise_definitions.len()
    );
    Ok(Seeded { workouts, catalog })
}

/// Load the catalog file and return it with the ids the store assigned.
pub async fn show_catalog(config: &CliConfig) -> CliResult<SeededCatalog> {
    Ok(seed_store(config).await?.catalog)
}

/// Seed the catalog, create the workout described by `submission_json` and
/// return its view.
pub async fn run(config: &CliConfig, submission_json: &str) -> CliResult<WorkoutView> {
    let seeded = seed_store(config).await?;
    let submission: CreateWorkoutSubmission = serde_json::from_str(submission_json)?;
    let workout = seeded
        .workouts
        .create_workout(config.user, &submission)
        .await?;
    Ok(WorkoutView::from(&workout))
}
