//! Workout and catalog services over the storage collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aggregate::{Workout, assemble_workout};
use crate::config::Config;
use crate::error::{WorkoutError, WorkoutResult, require};
use crate::model::{ExerciseDefinition, UserId, WorkoutType};
use crate::repository::{
    ExerciseDefinitionRepository, PageRequest, Slice, WorkoutRepository, WorkoutTypeRepository,
};
use crate::submission::{
    CreateExerciseDefinitionSubmission, CreateWorkoutSubmission, CreateWorkoutTypeSubmission,
    ExerciseSubmission,
};

/// Workout creation and listing, plus the workout-type catalog.
#[derive(Clone)]
pub struct WorkoutService {
    workouts: Arc<dyn WorkoutRepository>,
    workout_types: Arc<dyn WorkoutTypeRepository>,
    definitions: Arc<dyn ExerciseDefinitionRepository>,
    config: Config,
}

impl WorkoutService {
    pub fn new(
        workouts: Arc<dyn WorkoutRepository>,
        workout_types: Arc<dyn WorkoutTypeRepository>,
        definitions: Arc<dyn ExerciseDefinitionRepository>,
        config: Config,
    ) -> Self {
        Self {
            workouts,
            workout_types,
            definitions,
            config,
        }
    }

    /// Validate a submission, assemble the workout and persist it whole.
    ///
    /// Nothing is saved unless every record and set builds successfully.
    pub async fn create_workout(
        &self,
        user: UserId,
        submission: &CreateWorkoutSubmission,
    ) -> WorkoutResult<Workout> {
        let type_name = require(submission.workout_type.as_deref(), "type")?;
        let start_time = require(submission.start_time, "startTime")?;
        let end_time = require(submission.end_time, "endTime")?;
        let exercises = require(submission.exercises.as_deref(), "exercises")?;

        if exercises.is_empty() {
            return Err(WorkoutError::InvariantViolation(
                "exercises must not be empty".into(),
            ));
        }

        let workout_type = self
            .workout_types
            .find_workout_type_by_name(type_name)
            .await?
            .ok_or_else(|| {
                tracing::warn!("No WorkoutType with name [{}] found", type_name);
                WorkoutError::NotFound(format!("workout type [{type_name}]"))
            })?;

        let catalog = self.resolve_definitions(exercises).await?;

        let workout = assemble_workout(
            user,
            workout_type,
            start_time,
            end_time,
            exercises,
            &catalog,
            &self.config.validation,
        )?;

        let saved = self.workouts.save_workout(workout).await?;
        tracing::info!(
            workout_id = ?saved.id(),
            user = user.0,
            exercises = saved.exercises().len(),
            duration_ms = saved.duration_ms(),
            "created workout"
        );
        Ok(saved)
    }

    /// Fetch the definitions a submission references. Unknown ids are left
    /// out so the record builder reports them.
    async fn resolve_definitions(
        &self,
        exercises: &[ExerciseSubmission],
    ) -> WorkoutResult<HashMap<i64, ExerciseDefinition>> {
        let mut catalog = HashMap::new();
        for id in exercises.iter().filter_map(|e| e.exercise_definition_id) {
            if catalog.contains_key(&id) {
                continue;
            }
            match self.definitions.find_definition_by_id(id).await? {
                Some(definition) => {
                    catalog.insert(id, definition);
                }
                None => tracing::debug!("Exercise definition [{}] not found", id),
            }
        }
        Ok(catalog)
    }

    /// The user's workouts, newest first. Page size falls back to the
    /// configured default and is capped at the configured maximum.
    pub async fn list_workouts(
        &self,
        user: UserId,
        page: Option<usize>,
        size: Option<usize>,
    ) -> WorkoutResult<Slice<Workout>> {
        let size = size
            .filter(|s| *s > 0)
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        let request = PageRequest {
            page: page.unwrap_or(0),
            size,
        };
        tracing::debug!("Retrieving workouts for user: {}", user.0);
        let slice = self.workouts.workouts_for_user(user, request).await?;
        tracing::debug!(
            "Found {} workouts for user: {}",
            slice.content.len(),
            user.0
        );
        Ok(slice)
    }

    pub async fn create_workout_type(
        &self,
        submission: &CreateWorkoutTypeSubmission,
    ) -> WorkoutResult<WorkoutType> {
        let name = require(submission.name.as_deref(), "name")?.trim();
        if name.is_empty() {
            return Err(WorkoutError::Validation("name must not be blank".into()));
        }
        tracing::info!("Creating workout-type with name [{}]", name);

        if self.workout_types.exists_workout_type(name).await? {
            tracing::warn!("WorkoutType with name [{}] already exists", name);
            return Err(WorkoutError::InvariantViolation(format!(
                "workout type with name {name} already exists"
            )));
        }
        Ok(self.workout_types.insert_workout_type(name).await?)
    }

    pub async fn workout_types(&self) -> WorkoutResult<Vec<WorkoutType>> {
        Ok(self.workout_types.all_workout_types().await?)
    }
}

/// The exercise-definition catalog.
#[derive(Clone)]
pub struct ExerciseDefinitionService {
    definitions: Arc<dyn ExerciseDefinitionRepository>,
    workout_types: Arc<dyn WorkoutTypeRepository>,
}

impl ExerciseDefinitionService {
    pub fn new(
        definitions: Arc<dyn ExerciseDefinitionRepository>,
        workout_types: Arc<dyn WorkoutTypeRepository>,
    ) -> Self {
        Self {
            definitions,
            workout_types,
        }
    }

    pub async fn create_definition(
        &self,
        submission: &CreateExerciseDefinitionSubmission,
    ) -> WorkoutResult<ExerciseDefinition> {
        let name = require(submission.name.as_deref(), "name")?.trim();
        if name.is_empty() {
            return Err(WorkoutError::Validation("name must not be blank".into()));
        }
        let exercise_type = require(submission.exercise_type, "type")?;

        if self.definitions.exists_definition(name, exercise_type).await? {
            tracing::debug!(
                "Exercise Definition with name [{}] & type [{:?}] already exists",
                name,
                exercise_type
            );
            return Err(WorkoutError::InvariantViolation(format!(
                "exercise definition with name {name} and type {exercise_type:?} already exists"
            )));
        }
        Ok(self.definitions.insert_definition(name, exercise_type).await?)
    }

    pub async fn all_definitions(&self) -> WorkoutResult<Vec<ExerciseDefinition>> {
        Ok(self.definitions.all_definitions().await?)
    }

    /// Definitions the user has logged under a workout type, sorted by name.
    pub async fn recent_for_workout_type(
        &self,
        user: UserId,
        workout_type_id: i64,
    ) -> WorkoutResult<Vec<ExerciseDefinition>> {
        let workout_type = self
            .workout_types
            .find_workout_type_by_id(workout_type_id)
            .await?
            .ok_or_else(|| WorkoutError::NotFound(format!("workout type with id {workout_type_id}")))?;

        let mut used = self
            .definitions
            .definitions_used_by(user, workout_type.id)
            .await?;
        used.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::info!(
            "Retrieved {} recent exercises for workout type: {}",
            used.len(),
            workout_type.name
        );
        Ok(used)
    }
}
