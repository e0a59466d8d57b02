use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from a stored snowflake string
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse the string as a u64
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}

/// Parses an optional stored snowflake string.
pub fn parse_optional_u64(value: Option<&str>) -> Result<Option<u64>, AppError> {
    value.map(parse_u64_from_string).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_u64_from_string("1100000000000000001").unwrap(),
            1100000000000000001
        );
    }

    #[test]
    fn rejects_garbage() {
        let result = parse_u64_from_string("not-a-snowflake");
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseStringId { .. }))
        ));
    }

    #[test]
    fn optional_none_stays_none() {
        assert_eq!(parse_optional_u64(None).unwrap(), None);
        assert_eq!(parse_optional_u64(Some("42")).unwrap(), Some(42));
    }
}
