use std::fmt;

use thiserror::Error;

/// Lifecycle state of a worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Created, not yet installed.
    #[default]
    Parsed,
    /// Install in progress.
    Installing,
    /// Installed, waiting for activation.
    Installed,
    /// Activation in progress.
    Activating,
    /// Handling fetches.
    Activated,
    /// Replaced or terminated. Terminal.
    Redundant,
}

impl WorkerState {
    /// Static name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Activating => "activating",
            Self::Activated => "activated",
            Self::Redundant => "redundant",
        }
    }

    /// State reached by applying `phase`, if the move is allowed.
    pub fn next(self, phase: Phase) -> Result<Self, InvalidTransition> {
        use Phase::*;
        use WorkerState::*;

        match (self, phase) {
            (Parsed, BeginInstall) => Ok(Installing),
            (Installing, FinishInstall) => Ok(Installed),
            (Installed | Activated, BeginActivate) => Ok(Activating),
            (Activating, FinishActivate) => Ok(Activated),
            (Redundant, _) => Err(InvalidTransition { from: self, phase }),
            (_, Terminate) => Ok(Redundant),
            _ => Err(InvalidTransition { from: self, phase }),
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step in the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Install event received.
    BeginInstall,
    /// Install work done.
    FinishInstall,
    /// Activate event received.
    BeginActivate,
    /// Activation work done.
    FinishActivate,
    /// Worker discarded.
    Terminate,
}

/// A lifecycle step that is not allowed from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot apply {phase:?} in state {from}")]
pub struct InvalidTransition {
    /// State the worker was in; it is left unchanged.
    pub from: WorkerState,
    /// Rejected step.
    pub phase: Phase,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(phases: &[Phase]) -> Result<WorkerState, InvalidTransition> {
        phases
            .iter()
            .try_fold(WorkerState::default(), |state, phase| state.next(*phase))
    }

    #[test]
    fn happy_path_reaches_activated() {
        let state = run(&[
            Phase::BeginInstall,
            Phase::FinishInstall,
            Phase::BeginActivate,
            Phase::FinishActivate,
        ]);
        assert_eq!(state, Ok(WorkerState::Activated));
    }

    #[test]
    fn activation_can_be_repeated() {
        let state = run(&[
            Phase::BeginInstall,
            Phase::FinishInstall,
            Phase::BeginActivate,
            Phase::FinishActivate,
            Phase::BeginActivate,
            Phase::FinishActivate,
        ]);
        assert_eq!(state, Ok(WorkerState::Activated));
    }

    #[test]
    fn activate_before_install_is_rejected() {
        assert_eq!(
            WorkerState::Parsed.next(Phase::BeginActivate),
            Err(InvalidTransition {
                from: WorkerState::Parsed,
                phase: Phase::BeginActivate,
            })
        );
        assert!(WorkerState::Installed.next(Phase::BeginInstall).is_err());
    }

    #[test]
    fn redundant_is_terminal() {
        let state = WorkerState::Installing.next(Phase::Terminate).unwrap();
        assert_eq!(state, WorkerState::Redundant);
        assert!(state.next(Phase::BeginInstall).is_err());
        assert!(state.next(Phase::Terminate).is_err());
    }
}
