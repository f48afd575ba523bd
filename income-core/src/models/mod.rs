mod income_row;
mod row_list;

pub use income_row::{Field, FreelancerRow, IncomeRow, PermanentRow, RowKind};
pub use row_list::{RowEntry, RowId, RowList};
