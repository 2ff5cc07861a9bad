//! Rank computation for accepted submissions.

use anyhow::Result;

use crate::models::LeaderboardEntry;
use crate::repos::LeaderboardRepo;

/// Compute the 1-based rank of a durably-inserted entry.
///
/// An entry is outranked by every entry with a higher score, plus every
/// entry with the same score submitted earlier. Equal scores therefore rank
/// by submission time, a deterministic total order with no ties.
///
/// Both counts pivot on the entry's store-assigned `created_at`, never on a
/// locally-read clock: a concurrent same-score insert with a later clock
/// read must not produce a rank inconsistent with what the store recorded.
pub async fn compute_rank(repo: &dyn LeaderboardRepo, entry: &LeaderboardEntry) -> Result<i64> {
    let higher = repo.count_higher(&entry.game_id, entry.score).await?;
    let ties_before = repo
        .count_ties_before(&entry.game_id, entry.score, entry.created_at)
        .await?;

    Ok(higher + ties_before + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{MockLeaderboardRepo, NewEntry};
    use crate::test_utils::{mock_entry, InMemoryLeaderboardRepo};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn rank_counts_higher_scores_and_earlier_ties() {
        let entry = mock_entry("snake", 120);
        let created_at = entry.created_at;

        let mut repo = MockLeaderboardRepo::new();
        repo.expect_count_higher()
            .with(eq("snake"), eq(120))
            .returning(|_, _| Ok(3));
        repo.expect_count_ties_before()
            .with(eq("snake"), eq(120), eq(created_at))
            .returning(|_, _, _| Ok(1));

        let rank = compute_rank(&repo, &entry).await.unwrap();

        assert_eq!(rank, 5);
    }

    #[tokio::test]
    async fn unbeaten_entry_ranks_first() {
        let entry = mock_entry("snake", 120);

        let mut repo = MockLeaderboardRepo::new();
        repo.expect_count_higher().returning(|_, _| Ok(0));
        repo.expect_count_ties_before().returning(|_, _, _| Ok(0));

        let rank = compute_rank(&repo, &entry).await.unwrap();

        assert_eq!(rank, 1);
    }

    #[tokio::test]
    async fn equal_scores_rank_by_submission_order() {
        let repo = InMemoryLeaderboardRepo::new();
        let mut ranks = Vec::new();

        // Sequential submissions at strictly increasing timestamps.
        for score in [100, 100, 90] {
            let entry = repo
                .insert(NewEntry {
                    game_id: "snake".to_string(),
                    nickname: "TurboFalcon".to_string(),
                    score,
                })
                .await
                .unwrap();
            ranks.push(compute_rank(&repo, &entry).await.unwrap());
        }

        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn rank_only_considers_the_entry_game() {
        let repo = InMemoryLeaderboardRepo::new();

        repo.insert(NewEntry {
            game_id: "tetris".to_string(),
            nickname: "NeonWizard".to_string(),
            score: 900,
        })
        .await
        .unwrap();

        let entry = repo
            .insert(NewEntry {
                game_id: "snake".to_string(),
                nickname: "TurboFalcon".to_string(),
                score: 10,
            })
            .await
            .unwrap();

        assert_eq!(compute_rank(&repo, &entry).await.unwrap(), 1);
    }
}
