//! In-memory implementation of every repository trait.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::aggregate::Workout;
use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::model::{ExerciseDefinition, ExerciseType, UserId, WorkoutType};
use crate::repository::{
    ExerciseDefinitionRepository, PageRequest, Slice, WorkoutRepository, WorkoutTypeRepository,
};

#[derive(Default)]
struct State {
    definitions: Vec<ExerciseDefinition>,
    workout_types: Vec<WorkoutType>,
    workouts: Vec<Workout>,
    next_definition_id: i64,
    next_workout_type_id: i64,
    next_workout_id: i64,
    next_record_id: i64,
}

impl State {
    fn bump(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// Process-local store. Uniqueness is checked under the same lock as the
/// insert, so it holds even when two services race on the same name.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    pub async fn workout_count(&self) -> usize {
        self.state.lock().await.workouts.len()
    }
}

#[async_trait]
impl ExerciseDefinitionRepository for InMemoryStore {
    async fn find_definition_by_id(
        &self,
        id: i64,
    ) -> Result<Option<ExerciseDefinition>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.definitions.iter().find(|d| d.id == id).cloned())
    }

    async fn exists_definition(
        &self,
        name: &str,
        exercise_type: ExerciseType,
    ) -> Result<bool, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .definitions
            .iter()
            .any(|d| d.name == name && d.exercise_type == exercise_type))
    }

    async fn insert_definition(
        &self,
        name: &str,
        exercise_type: ExerciseType,
    ) -> Result<ExerciseDefinition, StoreError> {
        let mut state = self.state.lock().await;
        if state
            .definitions
            .iter()
            .any(|d| d.name == name && d.exercise_type == exercise_type)
        {
            return Err(StoreError::UniqueViolation(format!(
                "exercise_definition(name, type) = ({name}, {exercise_type:?})"
            )));
        }
        let id = State::bump(&mut state.next_definition_id);
        let definition = ExerciseDefinition {
            id,
            name: name.to_string(),
            exercise_type,
        };
        state.definitions.push(definition.clone());
        Ok(definition)
    }

    async fn all_definitions(&self) -> Result<Vec<ExerciseDefinition>, StoreError> {
        Ok(self.state.lock().await.definitions.clone())
    }

    async fn definitions_used_by(
        &self,
        user: UserId,
        workout_type_id: i64,
    ) -> Result<Vec<ExerciseDefinition>, StoreError> {
        let state = self.state.lock().await;
        let mut used: Vec<ExerciseDefinition> = Vec::new();
        for workout in state
            .workouts
            .iter()
            .filter(|w| w.user() == user && w.workout_type().id == workout_type_id)
        {
            for record in workout.exercises() {
                if !used.iter().any(|d| d.id == record.definition.id) {
                    used.push(record.definition.clone());
                }
            }
        }
        Ok(used)
    }
}

#[async_trait]
impl WorkoutTypeRepository for InMemoryStore {
    async fn find_workout_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<WorkoutType>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.workout_types.iter().find(|t| t.name == name).cloned())
    }

    async fn find_workout_type_by_id(&self, id: i64) -> Result<Option<WorkoutType>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.workout_types.iter().find(|t| t.id == id).cloned())
    }

    async fn exists_workout_type(&self, name: &str) -> Result<bool, StoreError> {
        let state = self.state.lock().await;
        Ok(state.workout_types.iter().any(|t| t.name == name))
    }

    async fn insert_workout_type(&self, name: &str) -> Result<WorkoutType, StoreError> {
        let mut state = self.state.lock().await;
        if state.workout_types.iter().any(|t| t.name == name) {
            return Err(StoreError::UniqueViolation(format!(
                "workout_type(name) = ({name})"
            )));
        }
        let id = State::bump(&mut state.next_workout_type_id);
        let workout_type = WorkoutType {
            id,
            name: name.to_string(),
        };
        state.workout_types.push(workout_type.clone());
        Ok(workout_type)
    }

    async fn all_workout_types(&self) -> Result<Vec<WorkoutType>, StoreError> {
        Ok(self.state.lock().await.workout_types.clone())
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryStore {
    async fn save_workout(&self, workout: Workout) -> Result<Workout, StoreError> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let state = &mut *state;
        let id = State::bump(&mut state.next_workout_id);
        let next_record_id = &mut state.next_record_id;
        let saved = workout.into_persisted(id, now, || State::bump(next_record_id));
        state.workouts.push(saved.clone());
        tracing::trace!(workout_id = id, "stored workout");
        Ok(saved)
    }

    async fn workouts_for_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Slice<Workout>, StoreError> {
        let state = self.state.lock().await;
        let mut mine: Vec<&Workout> = state.workouts.iter().filter(|w| w.user() == user).collect();
        mine.sort_by_key(|w| Reverse((w.created_at(), w.id())));

        let offset = page.offset();
        let content: Vec<Workout> = mine
            .iter()
            .skip(offset)
            .take(page.size)
            .map(|w| (*w).clone())
            .collect();
        let has_next = mine.len() > offset.saturating_add(content.len()) && page.size > 0;
        Ok(Slice {
            content,
            page: page.page,
            size: page.size,
            has_next,
        })
    }
}
