use crate::{build::BuildResult, forge::StatusState};

/// Collapses a build result into the commit status state GitHub understands,
/// plus the verb used in the status description.
pub fn classify(result: BuildResult) -> (StatusState, &'static str) {
    if result.is_better_or_equal_to(BuildResult::Success) {
        (StatusState::Success, "succeeded")
    } else if result.is_better_or_equal_to(BuildResult::Unstable) {
        (StatusState::Failure, "found unstable")
    } else {
        (StatusState::Error, "failed")
    }
}
