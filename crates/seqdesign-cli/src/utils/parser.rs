use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid chain identifier '{0}'. Expected a single character (e.g., 'A').")]
    InvalidChainId(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses one chain identifier, as given to `--chains`.
pub fn parse_chain_id(s: &str) -> Result<char, ParseError> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::InvalidChainId(s.to_string())),
    }
}

/// Splits a `KEY=VALUE` override at the first `=`.
pub fn split_key_value(s: &str) -> Result<(&str, &str), ParseError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_are_single_characters() {
        assert_eq!(parse_chain_id("A"), Ok('A'));
        assert_eq!(parse_chain_id(" b "), Ok('b'));
        assert_eq!(
            parse_chain_id("AB"),
            Err(ParseError::InvalidChainId("AB".to_string()))
        );
        assert!(parse_chain_id("").is_err());
        assert!(parse_chain_id("  ").is_err());
    }

    #[test]
    fn key_value_pairs_split_at_first_equals() {
        assert_eq!(
            split_key_value("sampling.temperature=0.2"),
            Ok(("sampling.temperature", "0.2"))
        );
        assert_eq!(split_key_value("model.script=a=b.py"), Ok(("model.script", "a=b.py")));
        assert!(split_key_value("no-equals-sign").is_err());
        assert!(split_key_value("=value").is_err());
    }
}
