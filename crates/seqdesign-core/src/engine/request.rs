use super::config::MAX_SEQUENCES;
use super::error::ValidationError;

/// A validated design request: which chains to redesign and how many
/// sequences to sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    chains: Vec<char>,
    num_sequences: usize,
}

impl DesignRequest {
    /// Duplicate chain ids are dropped, keeping first occurrences in order.
    pub fn new(chains: Vec<char>, num_sequences: usize) -> Result<Self, ValidationError> {
        let mut unique = Vec::with_capacity(chains.len());
        for id in chains {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        if unique.is_empty() {
            return Err(ValidationError::InvalidRequest(
                "at least one chain must be specified".to_string(),
            ));
        }
        if !(1..=MAX_SEQUENCES).contains(&num_sequences) {
            return Err(ValidationError::InvalidRequest(format!(
                "number of sequences must be between 1 and {}, got {}",
                MAX_SEQUENCES, num_sequences
            )));
        }

        Ok(Self {
            chains: unique,
            num_sequences,
        })
    }

    pub fn chains(&self) -> &[char] {
        &self.chains
    }

    pub fn num_sequences(&self) -> usize {
        self.num_sequences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ValidationCategory;

    #[test]
    fn duplicate_chains_are_removed_in_order() {
        let request = DesignRequest::new(vec!['B', 'A', 'B', 'A'], 3).unwrap();
        assert_eq!(request.chains(), &['B', 'A']);
        assert_eq!(request.num_sequences(), 3);
    }

    #[test]
    fn empty_chain_list_is_rejected() {
        let err = DesignRequest::new(Vec::new(), 3).unwrap_err();
        assert_eq!(err.category(), ValidationCategory::InvalidRequest);
    }

    #[test]
    fn sequence_count_must_be_within_bounds() {
        assert!(DesignRequest::new(vec!['A'], 1).is_ok());
        assert!(DesignRequest::new(vec!['A'], MAX_SEQUENCES).is_ok());

        let err = DesignRequest::new(vec!['A'], 0).unwrap_err();
        assert!(err.to_string().contains("between 1 and 10"));
        assert!(DesignRequest::new(vec!['A'], MAX_SEQUENCES + 1).is_err());
    }
}
