//! Storage collaborators the services depend on.
//!
//! Implementations own identity assignment and the authoritative uniqueness
//! constraints; the services only perform early existence checks.

use async_trait::async_trait;
use serde::Serialize;

use crate::aggregate::Workout;
use crate::error::StoreError;
use crate::model::{ExerciseDefinition, ExerciseType, UserId, WorkoutType};

#[async_trait]
pub trait ExerciseDefinitionRepository: Send + Sync + 'static {
    async fn find_definition_by_id(
        &self,
        id: i64,
    ) -> Result<Option<ExerciseDefinition>, StoreError>;

    async fn exists_definition(
        &self,
        name: &str,
        exercise_type: ExerciseType,
    ) -> Result<bool, StoreError>;

    /// Insert a definition; fails with `UniqueViolation` on a duplicate (name, type).
    async fn insert_definition(
        &self,
        name: &str,
        exercise_type: ExerciseType,
    ) -> Result<ExerciseDefinition, StoreError>;

    async fn all_definitions(&self) -> Result<Vec<ExerciseDefinition>, StoreError>;

    /// Distinct definitions used in the user's workouts of the given type.
    async fn definitions_used_by(
        &self,
        user: UserId,
        workout_type_id: i64,
    ) -> Result<Vec<ExerciseDefinition>, StoreError>;
}

#[async_trait]
pub trait WorkoutTypeRepository: Send + Sync + 'static {
    async fn find_workout_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<WorkoutType>, StoreError>;

    async fn find_workout_type_by_id(&self, id: i64) -> Result<Option<WorkoutType>, StoreError>;

    async fn exists_workout_type(&self, name: &str) -> Result<bool, StoreError>;

    /// Insert a workout type; fails with `UniqueViolation` on a duplicate name.
    async fn insert_workout_type(&self, name: &str) -> Result<WorkoutType, StoreError>;

    async fn all_workout_types(&self) -> Result<Vec<WorkoutType>, StoreError>;
}

#[async_trait]
pub trait WorkoutRepository: Send + Sync + 'static {
    /// Persist a workout with all of its records and sets in one step.
    async fn save_workout(&self, workout: Workout) -> Result<Workout, StoreError>;

    /// The user's workouts, newest first.
    async fn workouts_for_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Slice<Workout>, StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus whether another page follows.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub has_next: bool,
}

impl<T> Slice<T> {
    pub fn map<U, F>(self, f: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            has_next: self.has_next,
        }
    }
}
