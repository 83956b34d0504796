//! # Lottery Flows
//!
//! End-to-end scenarios through the simulated chain: deployment, entry,
//! access control, payout, and rollback.

#[cfg(test)]
mod tests {
    use crate::harness::{ether, ChainError, SimulatedChain, INITIAL_BALANCE};
    use qc_18_stake_pool::prelude::*;

    // =============================================================================
    // DEPLOYMENT & ENTRY
    // =============================================================================

    #[tokio::test]
    async fn test_deploys_with_owner_and_empty_pool() {
        let chain = SimulatedChain::deploy("0.01");

        assert_eq!(chain.lottery.owner(), chain.accounts[0]);
        assert_eq!(chain.lottery.minimum_stake(), ether("0.01"));
        assert!(chain.players(chain.owner()).await.is_empty());
    }

    #[tokio::test]
    async fn test_allows_one_account_to_enter() {
        let chain = SimulatedChain::deploy("0.01");
        let a = chain.accounts[0];

        chain.enter(a, "0.02").await.unwrap();

        let players = chain.players(a).await;
        assert_eq!(players, vec![a]);
        assert_eq!(players.len(), 1);
        assert_eq!(chain.lottery.pot().await, ether("0.02"));
    }

    #[tokio::test]
    async fn test_allows_multiple_accounts_in_entry_order() {
        let chain = SimulatedChain::deploy("0.01");
        let (a, b, c) = (chain.accounts[0], chain.accounts[1], chain.accounts[2]);

        chain.enter(a, "0.02").await.unwrap();
        chain.enter(b, "0.02").await.unwrap();
        chain.enter(c, "0.02").await.unwrap();

        assert_eq!(chain.players(a).await, vec![a, b, c]);
        assert_eq!(chain.lottery.pot().await, ether("0.06"));
    }

    #[tokio::test]
    async fn test_requires_minimum_stake_and_refunds() {
        let chain = SimulatedChain::deploy("0.01");
        let a = chain.accounts[0];

        let err = chain.enter(a, "0.001").await.unwrap_err();

        assert!(matches!(
            err,
            ChainError::Reverted(LotteryError::InsufficientStake { .. })
        ));
        assert!(chain.players(a).await.is_empty());
        assert_eq!(chain.balance(&a), ether(INITIAL_BALANCE));
    }

    #[tokio::test]
    async fn test_entry_beyond_balance_never_reaches_pool() {
        let chain = SimulatedChain::deploy("0.01");
        let b = chain.accounts[1];

        let err = chain.enter(b, "1000").await.unwrap_err();

        assert!(matches!(
            err,
            ChainError::Ledger(LedgerError::InsufficientFunds { .. })
        ));
        assert!(chain.players(b).await.is_empty());
    }

    // =============================================================================
    // SETTLEMENT
    // =============================================================================

    #[tokio::test]
    async fn test_only_manager_can_pick_winner() {
        let chain = SimulatedChain::deploy("0.01");
        let b = chain.accounts[1];
        chain.enter(b, "0.02").await.unwrap();

        let err = chain.pick_winner(b).await.unwrap_err();

        assert!(matches!(
            err,
            ChainError::Reverted(LotteryError::Unauthorized { caller }) if caller == b
        ));
        assert_eq!(chain.players(b).await, vec![b]);
        assert_eq!(chain.lottery.pot().await, ether("0.02"));
    }

    #[tokio::test]
    async fn test_sends_money_to_winner_and_resets() {
        let chain = SimulatedChain::deploy("0.01");
        let a = chain.owner();
        chain.enter(a, "2").await.unwrap();

        let initial = chain.balance(&a);
        let receipt = chain.pick_winner(a).await.unwrap();
        let difference = chain.balance(&a) - initial;

        assert_eq!(receipt.winner, a);
        assert!(difference > ether("1.8"));
        assert!(chain.players(a).await.is_empty());
        assert_eq!(chain.lottery.pot().await, U256::zero());
    }

    #[tokio::test]
    async fn test_pick_winner_on_empty_pool() {
        let chain = SimulatedChain::deploy("0.01");

        let err = chain.pick_winner(chain.owner()).await.unwrap_err();

        assert!(matches!(err, ChainError::Reverted(LotteryError::EmptyPool)));
        assert_eq!(chain.lottery.round().await, 0);
    }

    #[tokio::test]
    async fn test_winner_was_an_entrant() {
        let chain = SimulatedChain::deploy("0.01");
        for account in &chain.accounts[1..6] {
            chain.enter(*account, "0.5").await.unwrap();
        }
        let before = chain.players(chain.owner()).await;

        let receipt = chain.pick_winner(chain.owner()).await.unwrap();

        assert!(before.contains(&receipt.winner));
        assert_eq!(receipt.amount, ether("2.5"));
        assert_eq!(receipt.entrants, 5);
        assert_eq!(
            chain.balance(&receipt.winner),
            ether(INITIAL_BALANCE) - ether("0.5") + ether("2.5")
        );
    }

    #[tokio::test]
    async fn test_rounds_repeat() {
        let chain = SimulatedChain::deploy("0.01");
        let (b, c) = (chain.accounts[1], chain.accounts[2]);

        for round in 0..3u64 {
            chain.enter(b, "0.02").await.unwrap();
            chain.enter(c, "0.03").await.unwrap();
            let receipt = chain.pick_winner(chain.owner()).await.unwrap();
            assert_eq!(receipt.round, round);
            assert_eq!(receipt.amount, ether("0.05"));
        }

        assert_eq!(chain.lottery.round().await, 3);
        assert_eq!(chain.lottery.stats().await.total_paid_out, ether("0.15"));
    }

    #[tokio::test]
    async fn test_deterministic_entropy_fixes_the_winner() {
        let entropy = [0x11; 32];
        let chain = SimulatedChain::deploy_with("0.01", FixedEntropy(entropy));
        for account in &chain.accounts[..4] {
            chain.enter(*account, "0.02").await.unwrap();
        }
        let snapshot = chain.lottery.snapshot().await;
        let seed = derive_seed(&entropy, &chain.owner(), &snapshot.entries);
        let expected = chain.accounts[select_index(&seed, 4).unwrap()];

        let receipt = chain.pick_winner(chain.owner()).await.unwrap();

        assert_eq!(receipt.winner, expected);
    }

    #[tokio::test]
    async fn test_rejected_payout_leaves_everything_in_place() {
        let chain = SimulatedChain::deploy("0.01");
        let b = chain.accounts[1];
        chain.enter(b, "1").await.unwrap();
        chain.ledger.reject_transfers_to(b);
        let total = chain.total_value().await;

        let err = chain.pick_winner(chain.owner()).await.unwrap_err();

        assert!(matches!(
            err,
            ChainError::Reverted(LotteryError::SettlementTransferFailed { .. })
        ));
        assert_eq!(chain.players(b).await, vec![b]);
        assert_eq!(chain.lottery.pot().await, ether("1"));
        assert_eq!(chain.lottery.round().await, 0);
        assert_eq!(chain.total_value().await, total);

        chain.ledger.accept_transfers_to(b);
        chain.pick_winner(chain.owner()).await.unwrap();
        assert_eq!(chain.balance(&b), ether(INITIAL_BALANCE));
    }

    // =============================================================================
    // PERSISTENCE
    // =============================================================================

    #[tokio::test]
    async fn test_snapshot_survives_restart() {
        let chain = SimulatedChain::deploy("0.01");
        let (b, c) = (chain.accounts[1], chain.accounts[2]);
        chain.enter(b, "0.02").await.unwrap();
        chain.enter(c, "0.04").await.unwrap();

        let json = serde_json::to_string(&chain.lottery.snapshot().await).unwrap();
        let snapshot: PoolSnapshot = serde_json::from_str(&json).unwrap();
        let resumed =
            LotteryService::restore(snapshot, chain.ledger.clone(), ClockEntropy::new()).unwrap();

        assert_eq!(resumed.get_players(b).await, vec![b, c]);
        let receipt = resumed.select_winner(chain.owner()).await.unwrap();
        assert_eq!(receipt.amount, ether("0.06"));
    }

    #[tokio::test]
    async fn test_tampered_snapshot_rejected() {
        let chain = SimulatedChain::deploy("0.01");
        chain.enter(chain.accounts[1], "0.02").await.unwrap();

        let mut snapshot = chain.lottery.snapshot().await;
        snapshot.entries[0].stake = ether("0.001");
        snapshot.balance = ether("0.001");

        let result = LotteryService::restore(snapshot, chain.ledger.clone(), ClockEntropy::new());
        assert!(matches!(result, Err(LotteryError::CorruptSnapshot(_))));
    }
}
