/// Water counter commands

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::commands::CommandError;
use crate::domain::HydrationState;
use crate::repository::WellnessRepository;
use crate::storage::PreferenceStore;

/// What to do to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationAction {
    Drink,
    Undo,
    Reset,
    Status,
}

#[derive(Debug, Deserialize)]
pub struct HydrationParams {
    pub action: HydrationAction,
}

#[derive(Debug, Deserialize)]
pub struct HydrationTargetParams {
    pub target_glasses: u32,
}

#[derive(Debug, Serialize)]
pub struct HydrationResponse {
    pub glasses_drunk: u32,
    pub target_glasses: u32,
    pub progress_percent: u32,
    pub goal_reached: bool,
    pub message: String,
}

impl From<HydrationState> for HydrationResponse {
    fn from(state: HydrationState) -> Self {
        Self {
            glasses_drunk: state.glasses_drunk,
            target_glasses: state.target_glasses,
            progress_percent: state.progress_percent(),
            goal_reached: state.goal_reached(),
            message: format!(
                "💧 {}/{} glasses ({}%). {}",
                state.glasses_drunk,
                state.target_glasses,
                state.progress_percent(),
                state.status_message()
            ),
        }
    }
}

pub fn hydration<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: HydrationParams,
) -> Result<HydrationResponse, CommandError> {
    let state = match params.action {
        HydrationAction::Drink => repo.add_glass(Utc::now())?,
        HydrationAction::Undo => repo.remove_glass(Utc::now())?,
        HydrationAction::Reset => repo.reset_hydration()?,
        HydrationAction::Status => repo.get_hydration_state()?,
    };
    Ok(state.into())
}

pub fn set_hydration_target<S: PreferenceStore, Tz: TimeZone>(
    repo: &WellnessRepository<S, Tz>,
    params: HydrationTargetParams,
) -> Result<HydrationResponse, CommandError> {
    let state = repo.set_hydration_target(params.target_glasses)?;
    Ok(state.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;
    use crate::storage::MemoryPreferenceStore;

    fn repo() -> WellnessRepository<MemoryPreferenceStore, Utc> {
        WellnessRepository::with_timezone(MemoryPreferenceStore::new(), Utc)
    }

    fn act(repo: &WellnessRepository<MemoryPreferenceStore, Utc>, action: HydrationAction) -> HydrationResponse {
        hydration(repo, HydrationParams { action }).unwrap()
    }

    #[test]
    fn test_drink_until_goal() {
        let repo = repo();
        assert!(act(&repo, HydrationAction::Status).message.contains("Let's start"));

        for _ in 0..10 {
            act(&repo, HydrationAction::Drink);
        }
        let status = act(&repo, HydrationAction::Status);
        assert_eq!(status.glasses_drunk, 8);
        assert!(status.goal_reached);
        assert_eq!(status.progress_percent, 100);
    }

    #[test]
    fn test_undo_and_reset() {
        let repo = repo();
        act(&repo, HydrationAction::Drink);
        act(&repo, HydrationAction::Drink);
        assert_eq!(act(&repo, HydrationAction::Undo).glasses_drunk, 1);
        assert_eq!(act(&repo, HydrationAction::Reset).glasses_drunk, 0);
    }

    #[test]
    fn test_zero_target_rejected() {
        let repo = repo();
        let result = set_hydration_target(&repo, HydrationTargetParams { target_glasses: 0 });
        assert!(matches!(result, Err(CommandError::Repository(RepositoryError::Invalid(_)))));

        let ok = set_hydration_target(&repo, HydrationTargetParams { target_glasses: 10 }).unwrap();
        assert_eq!(ok.target_glasses, 10);
    }
}
