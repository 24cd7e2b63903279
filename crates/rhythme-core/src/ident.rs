//! Identifier and calendar utilities shared by all entities.

use jiff::{civil, Timestamp, Zoned};
use rand::{distr::Alphanumeric, Rng};

/// Generates a unique string identifier of the form
/// `<prefix>_<epoch-millis>_<suffix>`.
///
/// The millisecond component keeps identifiers roughly sortable by creation
/// time; the random alphanumeric suffix disambiguates identifiers created
/// within the same millisecond.
pub fn generate_id(prefix: &str) -> String {
    let millis = Timestamp::now().as_millisecond();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// Returns today's calendar date in the system timezone.
///
/// "Today" for overdue checks and completed-today statistics is always the
/// local calendar day, not the UTC day.
pub fn local_today() -> civil::Date {
    Zoned::now().date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("task");
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id("goal");
        let b = generate_id("goal");
        assert_ne!(a, b);
    }
}
