//! Account model and balance state machine
//!
//! `debit` and `credit` are the only balance mutators in the crate.
//! Everything else reads balances, never writes them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum AccountStatus {
    Active = 1,
    Locked = 2,
    Closed = 3,
}

impl AccountStatus {
    /// Get numeric ID for storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from storage ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AccountStatus::Active),
            2 => Some(AccountStatus::Locked),
            3 => Some(AccountStatus::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Locked => "LOCKED",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Balance mutation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Insufficient balance. Current balance: {balance}, Required: {required}")]
    Insufficient { balance: Decimal, required: Decimal },
}

/// A money-holding account
///
/// `version` is the optimistic-concurrency counter: every persisted mutation
/// increments it, and the store rejects a write whose version no longer
/// matches the stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: i64,
    pub holder_name: String,
    pub balance: Decimal,
    pub status: AccountStatus,
    pub version: i32,
    pub last_updated: DateTime<Utc>,
}

impl Account {
    pub fn new(account_id: i64, holder_name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            account_id,
            holder_name: holder_name.into(),
            balance,
            status: AccountStatus::Active,
            version: 0,
            last_updated: Utc::now(),
        }
    }

    /// Debit `amount` from this account.
    ///
    /// Fails without touching the balance if `amount <= 0` or the balance
    /// cannot cover it.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), BalanceError> {
        if amount <= Decimal::ZERO {
            return Err(BalanceError::NonPositiveAmount);
        }
        if self.balance < amount {
            return Err(BalanceError::Insufficient {
                balance: self.balance,
                required: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Credit `amount` to this account.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), BalanceError> {
        if amount <= Decimal::ZERO {
            return Err(BalanceError::NonPositiveAmount);
        }
        self.balance += amount;
        Ok(())
    }

    /// Whether the account can take part in transfers
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Account[{}] {} balance={} status={} v{}",
            self.account_id, self.holder_name, self.balance, self.status, self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(AccountStatus::from_id(1), Some(AccountStatus::Active));
        assert_eq!(AccountStatus::from_id(2), Some(AccountStatus::Locked));
        assert_eq!(AccountStatus::from_id(3), Some(AccountStatus::Closed));
        assert_eq!(AccountStatus::from_id(0), None);
        assert_eq!(AccountStatus::from_id(4), None);
    }

    #[test]
    fn test_debit_success() {
        let mut acc = Account::new(1, "alice", dec("1000.00"));
        acc.debit(dec("250.50")).unwrap();
        assert_eq!(acc.balance, dec("749.50"));
    }

    #[test]
    fn test_debit_insufficient_leaves_balance_unchanged() {
        let mut acc = Account::new(1, "alice", dec("100.00"));
        let err = acc.debit(dec("500.00")).unwrap_err();
        assert_eq!(
            err,
            BalanceError::Insufficient {
                balance: dec("100.00"),
                required: dec("500.00"),
            }
        );
        assert_eq!(acc.balance, dec("100.00"));
    }

    #[test]
    fn test_debit_exact_balance_goes_to_zero() {
        let mut acc = Account::new(1, "alice", dec("100.00"));
        acc.debit(dec("100.00")).unwrap();
        assert_eq!(acc.balance, dec("0.00"));
    }

    #[test]
    fn test_debit_rejects_zero_and_negative() {
        let mut acc = Account::new(1, "alice", dec("100.00"));
        assert_eq!(
            acc.debit(Decimal::ZERO),
            Err(BalanceError::NonPositiveAmount)
        );
        assert_eq!(acc.debit(dec("-5.00")), Err(BalanceError::NonPositiveAmount));
        assert_eq!(acc.balance, dec("100.00"));
    }

    #[test]
    fn test_credit_success() {
        let mut acc = Account::new(2, "bob", dec("200.00"));
        acc.credit(dec("0.01")).unwrap();
        assert_eq!(acc.balance, dec("200.01"));
    }

    #[test]
    fn test_credit_rejects_zero_and_negative() {
        let mut acc = Account::new(2, "bob", dec("200.00"));
        assert_eq!(
            acc.credit(Decimal::ZERO),
            Err(BalanceError::NonPositiveAmount)
        );
        assert_eq!(
            acc.credit(dec("-1.00")),
            Err(BalanceError::NonPositiveAmount)
        );
        assert_eq!(acc.balance, dec("200.00"));
    }

    #[test]
    fn test_is_active() {
        let mut acc = Account::new(3, "carol", dec("10.00"));
        assert!(acc.is_active());
        acc.status = AccountStatus::Locked;
        assert!(!acc.is_active());
        acc.status = AccountStatus::Closed;
        assert!(!acc.is_active());
    }

    #[test]
    fn test_debit_credit_conserve_total() {
        let mut a = Account::new(1, "alice", dec("1000.00"));
        let mut b = Account::new(2, "bob", dec("200.00"));
        let before = a.balance + b.balance;

        a.debit(dec("500.00")).unwrap();
        b.credit(dec("500.00")).unwrap();

        assert_eq!(a.balance + b.balance, before);
    }
}
