//! Seed file describing the exercise definitions and workout types a run
//! starts with.

use serde::{Deserialize, Serialize};

use datastream_workouts::views::{ExerciseDefinitionView, WorkoutTypeView};
use datastream_workouts::{
    CreateExerciseDefinitionSubmission, CreateWorkoutTypeSubmission, ExerciseDefinitionService,
    ExerciseType, WorkoutService,
};

use crate::error::CliResult;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSeed {
    #[serde(default)]
    pub workout_types: Vec<String>,
    #[serde(default)]
    pub exercise_definitions: Vec<DefinitionSeed>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DefinitionSeed {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

impl CatalogSeed {
    pub fn from_json(raw: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Insert every entry through the services and return what was stored.
    /// Definitions get ids in file order starting at 1.
    pub async fn apply(
        &self,
        workouts: &WorkoutService,
        definitions: &ExerciseDefinitionService,
    ) -> CliResult<SeededCatalog> {
        let mut seeded = SeededCatalog::default();
        for name in &self.workout_types {
            let created = workouts
                .create_workout_type(&CreateWorkoutTypeSubmission {
                    name: Some(name.clone()),
                })
                .await?;
            seeded.workout_types.push(WorkoutTypeView::from(&created));
        }
        for seed in &self.exercise_definitions {
            let created = definitions
                .create_definition(&CreateExerciseDefinitionSubmission {
                    name: Some(seed.name.clone()),
                    exercise_type: Some(seed.exercise_type),
                })
                .await?;
            tracing::debug!(id = created.id, name = %created.name, "seeded exercise definition");
            seeded
                .exercise_definitions
                .push(ExerciseDefinitionView::from(&created));
        }
        Ok(seeded)
    }
}

/// The catalog as stored, with assigned ids.
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeededCatalog {
    pub workout_types: Vec<WorkoutTypeView>,
    pub exercise_definitions: Vec<ExerciseDefinitionView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use datastream_workouts::{Config, InMemoryStore};
    use std::sync::Arc;

    #[test]
    fn parses_seed_file() {
        let seed = CatalogSeed::from_json(
            r#"{"workoutTypes": ["Pull Day"], "exerciseDefinitions": [{"name": "Running", "type": "DISTANCE"}]}"#,
        )
        .expect("seed");
        assert_eq!(seed.workout_types, vec!["Pull Day".to_string()]);
        assert_eq!(seed.exercise_definitions[0].exercise_type, ExerciseType::Distance);
    }

    #[tokio::test]
    async fn apply_returns_stored_entries_with_ids() {
        let store = Arc::new(InMemoryStore::default());
        let workouts = WorkoutService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Config::default(),
        );
        let definitions = ExerciseDefinitionService::new(store.clone(), store);
        let seed = CatalogSeed::from_json(
            r#"{"workoutTypes": ["Pull Day", "Cardio"], "exerciseDefinitions": [{"name": "Plank", "type": "SETS_TIME"}]}"#,
        )
        .expect("seed");

        let seeded = seed.apply(&workouts, &definitions).await.expect("apply");
        let ids: Vec<i64> = seeded.workout_types.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(seeded.exercise_definitions[0].id, 1);

        let value = serde_json::to_value(&seeded).expect("serialize");
        assert_eq!(
            value["exerciseDefinitions"][0],
            serde_json::json!({"id": 1, "name": "Plank", "type": "SETS_TIME"})
        );
        assert_eq!(value["workoutTypes"][1]["name"], "Cardio");

        // applying twice trips the uniqueness rule
        assert!(seed.apply(&workouts, &definitions).await.is_err());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = CatalogSeed::from_json("{}").expect("seed");
        assert_eq!(seed, CatalogSeed::default());
    }
}
