use crate::backend::domain::commands::expenses::{
    ManualExpenseCommand, RecordExpenseResult, ReplaceHistoryCommand, ReplaceHistoryResult,
};
use crate::backend::domain::models::Expense;
use shared::{
    ExpenseListResponse, ExpenseRecord, ManualExpenseRequest, ReceiptScanResponse,
    RecordExpenseResponse, ReplaceExpensesRequest, ReplaceExpensesResponse,
};

/// Mapper between shared expense DTOs and domain expenses.
pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_domain(dto: ExpenseRecord) -> Expense {
        Expense {
            date: dto.date,
            store: dto.store,
            item: dto.item,
            price: dto.price,
            category: dto.category,
        }
    }

    pub fn to_dto(domain: Expense) -> ExpenseRecord {
        ExpenseRecord {
            date: domain.date,
            store: domain.store,
            item: domain.item,
            price: domain.price,
            category: domain.category,
        }
    }

    pub fn to_list_dto(expenses: Vec<Expense>) -> ExpenseListResponse {
        ExpenseListResponse {
            expenses: expenses.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_manual_command(request: ManualExpenseRequest) -> ManualExpenseCommand {
        ManualExpenseCommand {
            date: request.date,
            price: request.price,
            category: request.category,
            store: request.store,
        }
    }

    pub fn to_replace_command(request: ReplaceExpensesRequest) -> ReplaceHistoryCommand {
        ReplaceHistoryCommand {
            expenses: request.expenses.into_iter().map(Self::to_domain).collect(),
        }
    }

    pub fn to_record_response(result: RecordExpenseResult) -> RecordExpenseResponse {
        RecordExpenseResponse {
            expense: Self::to_dto(result.expense),
            cash_balance: result.cash_balance,
            success_message: result.success_message,
        }
    }

    pub fn to_scan_response(result: RecordExpenseResult) -> ReceiptScanResponse {
        ReceiptScanResponse {
            expense: Self::to_dto(result.expense),
            cash_balance: result.cash_balance,
            success_message: result.success_message,
        }
    }

    pub fn to_replace_response(result: ReplaceHistoryResult) -> ReplaceExpensesResponse {
        ReplaceExpensesResponse {
            saved_count: result.saved_count,
            success_message: result.success_message,
        }
    }
}
