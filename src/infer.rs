use csv::StringRecord;

/// SQLite column type chosen for a loaded column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Infer one column type per header column by scanning every record.
///
/// A column is INTEGER if every non-empty value parses as i64, REAL if
/// every non-empty value parses as f64, TEXT otherwise. Empty values
/// carry no vote (they load as NULL), and a column with no values at all
/// is TEXT. Deterministic for a given input.
pub fn infer_column_types(column_count: usize, records: &[StringRecord]) -> Vec<ColumnType> {
    (0..column_count)
        .map(|col| infer_column(col, records))
        .collect()
}

fn infer_column(col: usize, records: &[StringRecord]) -> ColumnType {
    let mut ty = ColumnType::Integer;
    let mut saw_value = false;

    for record in records {
        let value = record.get(col).unwrap_or("");
        if value.is_empty() {
            continue;
        }
        saw_value = true;

        if ty == ColumnType::Integer && value.parse::<i64>().is_err() {
            ty = ColumnType::Real;
        }
        if ty == ColumnType::Real && value.parse::<f64>().is_err() {
            return ColumnType::Text;
        }
    }

    if saw_value { ty } else { ColumnType::Text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(rows: &[&[&str]]) -> Vec<StringRecord> {
        rows.iter().map(|r| StringRecord::from(r.to_vec())).collect()
    }

    #[test]
    fn test_integers() {
        let recs = records(&[&["1"], &["-7"], &["42"]]);
        assert_eq!(infer_column_types(1, &recs), vec![ColumnType::Integer]);
    }

    #[test]
    fn test_mixed_numbers_are_real() {
        let recs = records(&[&["1"], &["2.5"]]);
        assert_eq!(infer_column_types(1, &recs), vec![ColumnType::Real]);
    }

    #[test]
    fn test_any_word_makes_text() {
        let recs = records(&[&["1"], &["2.5"], &["n/a"]]);
        assert_eq!(infer_column_types(1, &recs), vec![ColumnType::Text]);
    }

    #[test]
    fn test_empty_values_carry_no_vote() {
        let recs = records(&[&["1"], &[""], &["3"]]);
        assert_eq!(infer_column_types(1, &recs), vec![ColumnType::Integer]);
    }

    #[test]
    fn test_all_empty_column_is_text() {
        let recs = records(&[&[""], &[""]]);
        assert_eq!(infer_column_types(1, &recs), vec![ColumnType::Text]);
    }

    #[test]
    fn test_no_records_is_text() {
        assert_eq!(infer_column_types(2, &[]), vec![ColumnType::Text; 2]);
    }

    #[test]
    fn test_short_record_treated_as_empty() {
        let recs = records(&[&["1", "a"], &["2"]]);
        assert_eq!(
            infer_column_types(2, &recs),
            vec![ColumnType::Integer, ColumnType::Text]
        );
    }
}
