//! Command access checks

use crate::discord::UserId;
use async_trait::async_trait;

/// Server permission tiers, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PermLevel {
    Muted,
    Nothing,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
    Tier6,
    Tier7,
    Tier8,
    Tier9,
    Tier10,
    TechnicalQueriesSlayer,
    TrialModerator,
    Moderator,
    Admin,
    Owner,
}

/// A guild member invoking a command
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub user_id: UserId,
}

#[async_trait]
pub trait PermissionSource: Send + Sync {
    async fn permission_level(&self, member: &Member) -> PermLevel;
}

/// Reject non-moderators while silent mode is on.
///
/// Returns the denial reason, or `None` when the command may run. Commands
/// outside a guild (no member) always pass.
pub async fn silent_mode_check(
    silent_mode: bool,
    member: Option<&Member>,
    permissions: &dyn PermissionSource,
) -> Option<String> {
    let member = member?;

    if silent_mode && permissions.permission_level(member).await < PermLevel::TrialModerator {
        tracing::debug!(user_id = %member.user_id, "Command blocked by silent mode");
        return Some("Silent mode is enabled and user is not a moderator".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(PermLevel);

    #[async_trait]
    impl PermissionSource for Fixed {
        async fn permission_level(&self, _member: &Member) -> PermLevel {
            self.0
        }
    }

    fn member() -> Member {
        Member {
            user_id: UserId::new(5),
        }
    }

    #[test]
    fn test_perm_level_ordering() {
        assert!(PermLevel::Muted < PermLevel::Nothing);
        assert!(PermLevel::Tier10 < PermLevel::TrialModerator);
        assert!(PermLevel::Moderator > PermLevel::TrialModerator);
    }

    #[tokio::test]
    async fn test_silent_mode_blocks_regular_users() {
        let m = member();
        let reason = silent_mode_check(true, Some(&m), &Fixed(PermLevel::Tier5)).await;
        assert_eq!(
            reason.as_deref(),
            Some("Silent mode is enabled and user is not a moderator")
        );
    }

    #[tokio::test]
    async fn test_silent_mode_allows_moderators() {
        let m = member();
        let check = silent_mode_check(true, Some(&m), &Fixed(PermLevel::TrialModerator));
        assert!(check.await.is_none());
    }

    #[tokio::test]
    async fn test_silent_mode_off_or_no_member() {
        let m = member();
        assert!(
            silent_mode_check(false, Some(&m), &Fixed(PermLevel::Muted))
                .await
                .is_none()
        );
        assert!(
            silent_mode_check(true, None, &Fixed(PermLevel::Muted))
                .await
                .is_none()
        );
    }
}
