use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{RepoError, Result};
use crate::models::{TransactionKind, WalletTransactionRow};

#[derive(Default)]
struct Ledger {
    balances: HashMap<Uuid, i64>,
    transactions: Vec<WalletTransactionRow>,
}

impl Ledger {
    fn record(
        &mut self,
        user_id: Uuid,
        kind: TransactionKind,
        amount: i64,
        tournament_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> WalletTransactionRow {
        let balance = self.balances.entry(user_id).or_insert(0);
        *balance += amount;

        let row = WalletTransactionRow {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount,
            tournament_id,
            balance_after: *balance,
            created_at: now,
        };
        self.transactions.push(row.clone());
        row
    }
}

/// Credit balances in whole units. Each movement is checked and applied
/// under a single write lock.
#[derive(Clone, Default)]
pub struct WalletRepo {
    ledger: Arc<RwLock<Ledger>>,
}

impl WalletRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn balance(&self, user_id: Uuid) -> i64 {
        self.ledger
            .read()
            .balances
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }

    pub async fn top_up(
        &self,
        user_id: Uuid,
        amount: i64,
        now: DateTime<Utc>,
    ) -> Result<WalletTransactionRow> {
        self.credit(user_id, amount, TransactionKind::TopUp, None, now)
            .await
    }

    pub async fn credit(
        &self,
        user_id: Uuid,
        amount: i64,
        kind: TransactionKind,
        tournament_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<WalletTransactionRow> {
        if amount <= 0 {
            return Err(RepoError::InvalidAmount(amount));
        }

        let row = self
            .ledger
            .write()
            .record(user_id, kind, amount, tournament_id, now);
        tracing::debug!(user_id = %user_id, kind = kind.as_str(), amount, "Wallet credited");
        Ok(row)
    }

    pub async fn debit(
        &self,
        user_id: Uuid,
        amount: i64,
        kind: TransactionKind,
        tournament_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<WalletTransactionRow> {
        if amount <= 0 {
            return Err(RepoError::InvalidAmount(amount));
        }

        let mut ledger = self.ledger.write();
        let available = ledger.balances.get(&user_id).copied().unwrap_or(0);
        if available < amount {
            return Err(RepoError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let row = ledger.record(user_id, kind, -amount, tournament_id, now);
        tracing::debug!(user_id = %user_id, kind = kind.as_str(), amount, "Wallet debited");
        Ok(row)
    }

    /// Transaction history for a user, oldest first.
    pub async fn transactions(&self, user_id: Uuid) -> Vec<WalletTransactionRow> {
        self.ledger
            .read()
            .transactions
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect()
    }
}
