//! Turns one submitted set into a validated [`ExerciseSet`].

use crate::config::ValidationPolicy;
use crate::error::{WorkoutResult, require};
use crate::model::{ExerciseSet, millis_between};
use crate::submission::SetSubmission;

/// Build a set from its submission.
///
/// Every field except `partialRepetitions` is mandatory. Partial repetitions
/// survive only on failed sets; for any other set they are dropped whatever
/// the client sent. `rest_before_ms` is left empty here because it depends on
/// the sibling sets, see [`crate::record_builder`].
pub fn build_exercise_set(
    submission: &SetSubmission,
    policy: &ValidationPolicy,
) -> WorkoutResult<ExerciseSet> {
    let start_time = require(submission.start_time, "startTime")?;
    let end_time = require(submission.end_time, "endTime")?;
    let failure = require(submission.is_failure, "isFailure")?;
    let repetitions = require(submission.repetitions, "repetitions")?;
    let weight_kg = require(submission.weight, "weight")?;
    let order_index = require(submission.order, "order")?;

    policy.check_window("set", &start_time, &end_time)?;

    let partial_repetitions = if failure {
        submission.partial_repetitions
    } else {
        None
    };

    Ok(ExerciseSet {
        start_time,
        end_time,
        rest_before_ms: None,
        duration_ms: Some(millis_between(&start_time, &end_time)),
        failure,
        weight_kg,
        repetitions,
        partial_repetitions,
        order_index,
    })
}
