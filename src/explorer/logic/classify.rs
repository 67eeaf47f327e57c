use super::types::{ColumnKind, Table};

/// Names of the columns declared with `kind`, in table order.
///
/// No matching column is not an error; the caller handles an empty list.
pub fn column_names(table: &Table, kind: ColumnKind) -> Vec<String> {
    table
        .schema()
        .into_iter()
        .filter(|(_, k)| *k == kind)
        .map(|(name, _)| name)
        .collect()
}

pub fn numeric_columns(table: &Table) -> Vec<String> {
    column_names(table, ColumnKind::Numeric)
}

/// Columns worth offering for date exploration.
///
/// Declared timestamp columns when there are any, otherwise every textual
/// column. Text candidates may still fail to convert later on.
pub fn date_candidates(table: &Table) -> Vec<String> {
    let declared = column_names(table, ColumnKind::Datetime);
    if declared.is_empty() {
        tracing::debug!("No timestamp columns declared, offering text columns as dates");
        column_names(table, ColumnKind::Text)
    } else {
        declared
    }
}
