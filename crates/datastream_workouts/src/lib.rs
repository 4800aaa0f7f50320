//! Workout aggregate construction for Datastream.
//!
//! A raw [`CreateWorkoutSubmission`] is turned into a time-ordered
//! [`Workout`] in three pure steps: [`set_builder`] validates and normalizes
//! sets, [`record_builder`] dispatches on the exercise type to build distance
//! or set-based records, and [`aggregate`] sorts the records and derives the
//! workout's end time and duration. [`service`] wraps those steps with the
//! storage lookups and the final save.

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod error;
pub mod memory_store;
pub mod model;
pub mod record_builder;
pub mod repository;
pub mod service;
pub mod set_builder;
pub mod submission;
pub mod views;

pub use aggregate::{Workout, assemble_workout};
pub use config::{Config, ValidationPolicy};
pub use error::{StoreError, WorkoutError, WorkoutResult};
pub use memory_store::InMemoryStore;
pub use model::{
    DistanceUnit, ExerciseDefinition, ExerciseRecord, ExerciseSet, ExerciseType, RecordDetails,
    Timestamp, UserId, WorkoutType,
};
pub use service::{ExerciseDefinitionService, WorkoutService};
pub use submission::{
    CreateExerciseDefinitionSubmission, CreateWorkoutSubmission, CreateWorkoutTypeSubmission,
    ExerciseDetails, ExerciseSubmission, SetSubmission,
};
