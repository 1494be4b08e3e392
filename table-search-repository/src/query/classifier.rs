//! Column type classification.

/// Bucket a column type falls into. Decides which operators apply and how
/// values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnClass {
    Numeric,
    Date,
    String,
    Unknown,
}

const NUMERIC_TYPES: &[&str] = &[
    "INTEGER",
    "UNSIGNED_INT",
    "BIGINT",
    "UNSIGNED_LONG",
    "UNSIGNED_TINYINT",
    "SMALLINT",
    "UNSIGNED_SMALLINT",
    "FLOAT",
    "UNSIGNED_FLOAT",
    "DOUBLE",
    "UNSIGNED_DOUBLE",
    "DECIMAL",
];

const DATE_TYPES: &[&str] = &[
    "TIME",
    "DATE",
    "TIMESTAMP",
    "UNSIGNED_TIME",
    "UNSIGNED_DATE",
    "UNSIGNED_TIMESTAMP",
];

const STRING_TYPES: &[&str] = &["VARCHAR", "CHAR"];

/// Classify an upper-cased, trimmed column type name.
///
/// The lookup is exact and case-sensitive; `"bigint"` is `Unknown`.
pub fn classify(type_name: &str) -> ColumnClass {
    if NUMERIC_TYPES.contains(&type_name) {
        ColumnClass::Numeric
    } else if DATE_TYPES.contains(&type_name) {
        ColumnClass::Date
    } else if STRING_TYPES.contains(&type_name) {
        ColumnClass::String
    } else {
        ColumnClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types() {
        for name in NUMERIC_TYPES {
            assert_eq!(classify(name), ColumnClass::Numeric, "{}", name);
        }
    }

    #[test]
    fn test_date_types() {
        for name in DATE_TYPES {
            assert_eq!(classify(name), ColumnClass::Date, "{}", name);
        }
    }

    #[test]
    fn test_string_types() {
        assert_eq!(classify("VARCHAR"), ColumnClass::String);
        assert_eq!(classify("CHAR"), ColumnClass::String);
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(classify("BOOLEAN"), ColumnClass::Unknown);
        assert_eq!(classify("VARBINARY"), ColumnClass::Unknown);
        assert_eq!(classify(""), ColumnClass::Unknown);
        // No normalization happens here
        assert_eq!(classify("bigint"), ColumnClass::Unknown);
        assert_eq!(classify(" BIGINT"), ColumnClass::Unknown);
    }

    #[test]
    fn test_sets_are_disjoint() {
        for name in NUMERIC_TYPES {
            assert!(!DATE_TYPES.contains(name) && !STRING_TYPES.contains(name));
        }
        for name in DATE_TYPES {
            assert!(!STRING_TYPES.contains(name));
        }
    }
}
