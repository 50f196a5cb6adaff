pub mod asset_mapper;
pub mod expense_mapper;
pub mod summary_mapper;

pub use asset_mapper::AssetMapper;
pub use expense_mapper::ExpenseMapper;
pub use summary_mapper::SummaryMapper;
