//! Domain-level command and result types.
//!
//! These are used inside the domain layer only. The REST and HTML layers map
//! their request types onto them.

pub mod expenses {
    use crate::backend::domain::models::Expense;

    /// Record one expense and pay it from cash.
    #[derive(Debug, Clone)]
    pub struct RecordExpenseCommand {
        /// Any parseable date; today when absent
        pub date: Option<String>,
        pub store: String,
        pub item: String,
        pub price: i64,
        pub category: String,
    }

    /// Manual entry form input.
    #[derive(Debug, Clone)]
    pub struct ManualExpenseCommand {
        pub date: Option<String>,
        pub price: i64,
        pub category: String,
        pub store: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct RecordExpenseResult {
        pub expense: Expense,
        /// Cash balance after the deduction
        pub cash_balance: i64,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct ReplaceHistoryCommand {
        pub expenses: Vec<Expense>,
    }

    #[derive(Debug, Clone)]
    pub struct ReplaceHistoryResult {
        pub saved_count: usize,
        pub success_message: String,
    }
}

pub mod assets {
    /// Add `delta` (negative to subtract) to one asset.
    #[derive(Debug, Clone)]
    pub struct AdjustAssetCommand {
        pub name: String,
        pub delta: i64,
    }

    #[derive(Debug, Clone)]
    pub struct AdjustAssetResult {
        pub name: String,
        pub new_amount: i64,
    }
}

pub mod auth {
    /// Outcome of a login attempt; `session_token` is set only on success.
    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub session_token: Option<String>,
        pub message: String,
    }

    impl LoginResult {
        pub fn is_success(&self) -> bool {
            self.session_token.is_some()
        }
    }
}
