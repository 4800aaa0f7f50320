//! The [`Workout`] aggregate root and its construction rules.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ValidationPolicy;
use crate::error::{WorkoutError, WorkoutResult};
use crate::model::{ExerciseRecord, Timestamp, UserId, WorkoutType, millis_between};
use crate::record_builder::{DefinitionLookup, build_exercise_record};
use crate::submission::ExerciseSubmission;

/// One logged exercise session.
///
/// Only constructed through [`Workout::from_records`] (or
/// [`assemble_workout`]), so `exercises` is never empty, always sorted by
/// order index, and `end_time`/`duration_ms` are consistent with it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Workout {
    id: Option<i64>,
    user: UserId,
    workout_type: WorkoutType,
    start_time: Timestamp,
    end_time: Timestamp,
    duration_ms: i64,
    exercises: Vec<ExerciseRecord>,
    created_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Assemble a workout from already built records.
    ///
    /// The end time is pushed out to the last record's end when that record
    /// finishes after the nominal end. The start time is never moved.
    pub fn from_records(
        user: UserId,
        workout_type: WorkoutType,
        start_time: Timestamp,
        end_time: Timestamp,
        mut exercises: Vec<ExerciseRecord>,
        policy: &ValidationPolicy,
    ) -> WorkoutResult<Self> {
        if exercises.is_empty() {
            return Err(WorkoutError::InvariantViolation(
                "exercises must not be empty".into(),
            ));
        }
        policy.check_window("workout", &start_time, &end_time)?;

        exercises.sort_by_key(|e| e.order_index);

        let end_time = match exercises.last() {
            Some(last) if last.end_time > end_time => last.end_time,
            _ => end_time,
        };

        Ok(Self {
            id: None,
            user,
            workout_type,
            start_time,
            end_time,
            duration_ms: millis_between(&start_time, &end_time),
            exercises,
            created_at: None,
        })
    }

    /// Stamp storage identity onto the workout and its records.
    ///
    /// `record_id` is called once per record, in order.
    pub fn into_persisted<F>(
        mut self,
        id: i64,
        created_at: DateTime<Utc>,
        mut record_id: F,
    ) -> Self
    where
        F: FnMut() -> i64,
    {
        self.id = Some(id);
        self.created_at = Some(created_at);
        for record in &mut self.exercises {
            if record.id.is_none() {
                record.id = Some(record_id());
            }
            record.workout_id = Some(id);
        }
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn workout_type(&self) -> &WorkoutType {
        &self.workout_type
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Build every record of a submission and assemble them into a workout.
///
/// Pure: the workout type and the exercise definitions must already be
/// resolved by the caller.
pub fn assemble_workout<L>(
    user: UserId,
    workout_type: WorkoutType,
    start_time: Timestamp,
    end_time: Timestamp,
    submissions: &[ExerciseSubmission],
    definitions: &L,
    policy: &ValidationPolicy,
) -> WorkoutResult<Workout>
where
    L: DefinitionLookup + ?Sized,
{
    if submissions.is_empty() {
        return Err(WorkoutError::InvariantViolation(
            "exercises must not be empty".into(),
        ));
    }
    let records = submissions
        .iter()
        .map(|s| build_exercise_record(s, definitions, policy))
        .collect::<WorkoutResult<Vec<_>>>()?;
    Workout::from_records(user, workout_type, start_time, end_time, records, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DistanceUnit, ExerciseDefinition, ExerciseType};
    use crate::submission::{ExerciseDetails, SetSubmission};
    use chrono::Duration;

    fn t0() -> Timestamp {
        DateTime::parse_from_rfc3339("2025-09-10T18:00:00Z").unwrap()
    }

    fn pull_day() -> WorkoutType {
        WorkoutType {
            id: 7,
            name: "Pull Day".into(),
        }
    }

    fn catalog() -> Vec<ExerciseDefinition> {
        vec![
            ExerciseDefinition {
                id: 1,
                name: "Rowing".into(),
                exercise_type: ExerciseType::Distance,
            },
            ExerciseDefinition {
                id: 2,
                name: "Pull Up".into(),
                exercise_type: ExerciseType::SetsReps,
            },
        ]
    }

    fn rowing(order: i32, from_min: i64, to_min: i64) -> ExerciseSubmission {
        ExerciseSubmission {
            exercise_definition_id: Some(1),
            start_time: Some(t0() + Duration::minutes(from_min)),
            end_time: Some(t0() + Duration::minutes(to_min)),
            details: Some(ExerciseDetails {
                distance: Some(2000.0),
                distance_unit: Some(DistanceUnit::Meters),
                ..Default::default()
            }),
            order: Some(order),
        }
    }

    fn pull_ups(order: i32, minute: i64) -> ExerciseSubmission {
        ExerciseSubmission {
            exercise_definition_id: Some(2),
            start_time: Some(t0()),
            end_time: Some(t0()),
            details: Some(ExerciseDetails {
                sets: Some(vec![SetSubmission {
                    start_time: Some(t0() + Duration::minutes(minute)),
                    end_time: Some(t0() + Duration::minutes(minute + 1)),
                    is_failure: Some(true),
                    repetitions: Some(6),
                    partial_repetitions: Some(1),
                    weight: Some(0.0),
                    order: Some(0),
                }]),
                ..Default::default()
            }),
            order: Some(order),
        }
    }

    #[test]
    fn records_sorted_by_order_regardless_of_submission_order() {
        let subs = vec![rowing(2, 20, 30), pull_ups(0, 0), rowing(1, 5, 15)];
        let workout = assemble_workout(
            UserId(1),
            pull_day(),
            t0(),
            t0() + Duration::hours(1),
            &subs,
            catalog().as_slice(),
            &ValidationPolicy::default(),
        )
        .expect("workout");
        let orders: Vec<i32> = workout.exercises().iter().map(|e| e.order_index).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn end_time_extends_to_last_record() {
        let subs = vec![pull_ups(0, 0), rowing(1, 10, 90)];
        let workout = assemble_workout(
            UserId(1),
            pull_day(),
            t0(),
            t0() + Duration::hours(1),
            &subs,
            catalog().as_slice(),
            &ValidationPolicy::default(),
        )
        .expect("workout");
        assert_eq!(workout.end_time(), t0() + Duration::minutes(90));
        assert_eq!(workout.start_time(), t0());
        assert_eq!(workout.duration_ms(), 90 * 60 * 1000);
    }

    #[test]
    fn end_time_kept_when_last_record_finishes_earlier() {
        // order 1 finishes earlier than order 0; only the last by order counts
        let subs = vec![rowing(0, 0, 75), rowing(1, 10, 20)];
        let workout = assemble_workout(
            UserId(1),
            pull_day(),
            t0(),
            t0() + Duration::hours(1),
            &subs,
            catalog().as_slice(),
            &ValidationPolicy::default(),
        )
        .expect("workout");
        assert_eq!(workout.end_time(), t0() + Duration::hours(1));
        assert_eq!(workout.duration_ms(), 3_600_000);
    }

    #[test]
    fn empty_exercises_is_an_invariant_violation() {
        let err = assemble_workout(
            UserId(1),
            pull_day(),
            t0(),
            t0(),
            &[],
            catalog().as_slice(),
            &ValidationPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkoutError::InvariantViolation(msg) if msg == "exercises must not be empty"));

        let err = Workout::from_records(
            UserId(1),
            pull_day(),
            t0(),
            t0(),
            vec![],
            &ValidationPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkoutError::InvariantViolation(_)));
    }

    #[test]
    fn strict_policy_rejects_inverted_workout_window() {
        let subs = vec![rowing(0, 0, 10)];
        let err = assemble_workout(
            UserId(1),
            pull_day(),
            t0(),
            t0() - Duration::minutes(1),
            &subs,
            catalog().as_slice(),
            &ValidationPolicy::strict(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkoutError::InvariantViolation(_)));
    }

    #[test]
    fn into_persisted_sets_back_references() {
        let subs = vec![rowing(0, 0, 10), pull_ups(1, 12)];
        let workout = assemble_workout(
            UserId(3),
            pull_day(),
            t0(),
            t0() + Duration::minutes(30),
            &subs,
            catalog().as_slice(),
            &ValidationPolicy::default(),
        )
        .expect("workout");
        assert!(workout.exercises().iter().all(|e| e.workout_id.is_none()));

        let mut next = 100;
        let saved = workout.into_persisted(42, Utc::now(), || {
            next += 1;
            next
        });
        assert_eq!(saved.id(), Some(42));
        assert!(saved.created_at().is_some());
        let ids: Vec<_> = saved.exercises().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Some(101), Some(102)]);
        assert!(saved.exercises().iter().all(|e| e.workout_id == Some(42)));
    }
}
