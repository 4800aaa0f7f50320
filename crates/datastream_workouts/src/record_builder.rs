//! Builds polymorphic [`ExerciseRecord`]s, dispatching on the definition's type.

use std::collections::HashMap;

use crate::config::ValidationPolicy;
use crate::error::{WorkoutError, WorkoutResult, require};
use crate::model::{
    DistanceDetails, ExerciseDefinition, ExerciseRecord, ExerciseSet, RecordDetails,
    SetBasedDetails, Timestamp, millis_between,
};
use crate::set_builder::build_exercise_set;
use crate::submission::{ExerciseDetails, ExerciseSubmission};

/// Synchronous view over exercise definitions already fetched from storage.
pub trait DefinitionLookup {
    fn find_exercise_definition(&self, id: i64) -> Option<&ExerciseDefinition>;
}

impl DefinitionLookup for HashMap<i64, ExerciseDefinition> {
    fn find_exercise_definition(&self, id: i64) -> Option<&ExerciseDefinition> {
        self.get(&id)
    }
}

impl DefinitionLookup for [ExerciseDefinition] {
    fn find_exercise_definition(&self, id: i64) -> Option<&ExerciseDefinition> {
        self.iter().find(|d| d.id == id)
    }
}

/// Build one record from its submission.
///
/// Distance records keep the submitted start/end. Set-based records take
/// their window from the first and last set once sorted by order index, so
/// the submitted start/end only have to be present.
pub fn build_exercise_record<L>(
    submission: &ExerciseSubmission,
    definitions: &L,
    policy: &ValidationPolicy,
) -> WorkoutResult<ExerciseRecord>
where
    L: DefinitionLookup + ?Sized,
{
    let definition_id = require(submission.exercise_definition_id, "exerciseDefinitionId")?;
    let start_time = require(submission.start_time, "startTime")?;
    let end_time = require(submission.end_time, "endTime")?;
    let order_index = require(submission.order, "order")?;

    let definition = definitions
        .find_exercise_definition(definition_id)
        .ok_or_else(|| {
            WorkoutError::NotFound(format!("exercise definition with id {definition_id}"))
        })?
        .clone();

    let details = require(submission.details.as_ref(), "details")?;

    if definition.exercise_type.is_set_based() {
        build_set_based_record(definition, order_index, details, policy)
    } else {
        build_distance_record(definition, start_time, end_time, order_index, details, policy)
    }
}

fn build_distance_record(
    definition: ExerciseDefinition,
    start_time: Timestamp,
    end_time: Timestamp,
    order_index: i32,
    details: &ExerciseDetails,
    policy: &ValidationPolicy,
) -> WorkoutResult<ExerciseRecord> {
    let distance = require(details.distance, "distance")?;
    let distance_unit = require(details.distance_unit, "distanceUnit")?;
    policy.check_window("exercise", &start_time, &end_time)?;

    Ok(ExerciseRecord {
        id: None,
        workout_id: None,
        definition,
        start_time,
        end_time,
        order_index,
        details: RecordDetails::Distance(DistanceDetails {
            distance,
            distance_unit,
            duration_ms: millis_between(&start_time, &end_time),
            distance_per_unit: details.distance_per_unit,
            weight_kg: details.weight_kg,
        }),
    })
}

fn build_set_based_record(
    definition: ExerciseDefinition,
    order_index: i32,
    details: &ExerciseDetails,
    policy: &ValidationPolicy,
) -> WorkoutResult<ExerciseRecord> {
    let submissions = require(details.sets.as_ref(), "sets")?;
    if submissions.is_empty() {
        return Err(WorkoutError::Validation("sets must not be empty".into()));
    }

    let mut sets = submissions
        .iter()
        .map(|s| build_exercise_set(s, policy))
        .collect::<WorkoutResult<Vec<_>>>()?;
    // Stable: sets sharing an order index keep their submission order.
    sets.sort_by_key(|s| s.order_index);
    let average_rest_time_ms = fill_rest_times(&mut sets);

    let (Some(first), Some(last)) = (sets.first(), sets.last()) else {
        return Err(WorkoutError::Validation("sets must not be empty".into()));
    };
    let start_time = first.start_time;
    let end_time = last.end_time;
    policy.check_window("exercise", &start_time, &end_time)?;

    Ok(ExerciseRecord {
        id: None,
        workout_id: None,
        definition,
        start_time,
        end_time,
        order_index,
        details: RecordDetails::SetBased(SetBasedDetails {
            sets,
            average_rest_time_ms,
            weight_kg: details.weight_kg,
        }),
    })
}

/// Set each set's rest as the gap after its predecessor and return the mean rest.
fn fill_rest_times(sets: &mut [ExerciseSet]) -> Option<f64> {
    let mut total = 0i64;
    let mut count = 0usize;
    for i in 1..sets.len() {
        let rest = millis_between(&sets[i - 1].end_time, &sets[i].start_time);
        sets[i].rest_before_ms = Some(rest);
        total += rest;
        count += 1;
    }
    (count > 0).then(|| total as f64 / count as f64)
}
