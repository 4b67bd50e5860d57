use crate::model::schema::{parse_calendar_date, ValidationError};
use chrono::NaiveDate;

/// Closed interval `[start, end]`.
///
/// An interval with `start > end` is valid and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclusiveRange<K> {
    pub start: K,
    pub end: K,
}

impl<K: PartialOrd> InclusiveRange<K> {
    pub fn new(start: K, end: K) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, value: &K) -> bool {
        *value >= self.start && *value <= self.end
    }
}

/// Predicate matching records whose projected field equals `expected`.
pub fn field_equals<'v, T, V>(
    field: impl Fn(&T) -> &V + 'v,
    expected: &'v V,
) -> impl Fn(&T) -> bool + 'v
where
    T: 'v,
    V: PartialEq + ?Sized + 'v,
{
    move |record| field(record) == expected
}

/// Builds a calendar-date range from two textual bounds.
pub fn date_range(start: &str, end: &str) -> Result<InclusiveRange<NaiveDate>, ValidationError> {
    Ok(InclusiveRange::new(parse_bound(start)?, parse_bound(end)?))
}

/// Builds a numeric price range. NaN bounds are rejected.
pub fn price_range(min: f64, max: f64) -> Result<InclusiveRange<f64>, ValidationError> {
    if min.is_nan() || max.is_nan() {
        return Err(ValidationError::InvalidRange {
            reason: format!("price bounds must be numbers, got [{min}, {max}]"),
        });
    }
    Ok(InclusiveRange::new(min, max))
}

fn parse_bound(value: &str) -> Result<NaiveDate, ValidationError> {
    parse_calendar_date(value).ok_or_else(|| ValidationError::InvalidDate {
        value: value.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{date_range, field_equals, price_range, InclusiveRange};
    use chrono::NaiveDate;

    #[test]
    fn range_includes_both_bounds() {
        let range = InclusiveRange::new(10.0, 20.0);
        assert!(range.contains(&10.0));
        assert!(range.contains(&20.0));
        assert!(!range.contains(&9.0));
        assert!(!range.contains(&20.5));
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = InclusiveRange::new(5, 1);
        assert!((0..10).all(|value| !range.contains(&value)));
    }

    #[test]
    fn date_range_compares_calendar_dates() {
        let range = date_range("2024-01-01", "2024-01-31T23:59:59Z").unwrap();
        let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let feb_1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(range.contains(&jan_31));
        assert!(!range.contains(&feb_1));
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        assert!(date_range("2024-13-01", "2024-12-31").is_err());
        assert!(price_range(f64::NAN, 10.0).is_err());
        assert!(price_range(0.0, f64::INFINITY).is_ok());
    }

    #[test]
    fn field_equals_selects_matching_records() {
        let records = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("a".to_string(), 3),
        ];
        let is_a = field_equals(|record: &(String, i32)| record.0.as_str(), "a");
        let selected: Vec<i32> = records
            .iter()
            .filter(|record| is_a(record))
            .map(|record| record.1)
            .collect();
        assert_eq!(selected, vec![1, 3]);
    }
}
