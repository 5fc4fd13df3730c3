//! Post-build steps known to the build engine.

/// Whether a step must wait for the same step of earlier builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStepMonitor {
    None,
    Step,
    Build,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub monitor: BuildStepMonitor,
}

pub const COMMIT_NOTIFIER: StepDescriptor = StepDescriptor {
    id: "github-commit-notifier",
    display_name: "Set build status on GitHub commit",
    monitor: BuildStepMonitor::None,
};

pub static POST_BUILD_STEPS: &[StepDescriptor] = &[COMMIT_NOTIFIER];

pub fn find_step(id: &str) -> Option<&'static StepDescriptor> {
    POST_BUILD_STEPS.iter().find(|step| step.id == id)
}
