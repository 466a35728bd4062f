pub mod columns;
pub mod node_id;
pub mod params;
pub mod sampler;

use thiserror::Error;

pub use columns::expand_custody_columns;
pub use node_id::NodeId;
pub use params::{
    CustodyParams, CUSTODY_REQUIREMENT, DATA_COLUMN_SIDECAR_SUBNET_COUNT, NUM_OF_COLUMNS,
};
pub use sampler::compute_custody_subnets;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustodyError {
    #[error("unable to parse node id {id:?}: {reason}")]
    InvalidIdentifierFormat { id: String, reason: String },
    #[error("invalid custody configuration: {0}")]
    InvalidConfiguration(String),
    #[error("subnet index {index} out of range [0, {subnet_count})")]
    IndexOutOfRange { index: u32, subnet_count: u32 },
}

/// The network's data column sidecar subnet count.
#[must_use]
pub const fn data_column_sidecar_subnet_count() -> u32 {
    DATA_COLUMN_SIDECAR_SUBNET_COUNT
}

/// Computes the custody subnets for a hex-encoded node id, falling back to
/// [`DATA_COLUMN_SIDECAR_SUBNET_COUNT`] when no subnet count is given.
pub fn custody_subnets(
    node_id: &str,
    subnet_count: Option<u32>,
) -> Result<Vec<u32>, CustodyError> {
    let node_id = NodeId::from_hex(node_id)?;
    let subnet_count = subnet_count.unwrap_or(DATA_COLUMN_SIDECAR_SUBNET_COUNT);
    compute_custody_subnets(&node_id, subnet_count)
}

/// Expands custody subnets into data column indices under the default column
/// layout.
pub fn custody_columns(subnets: &[u32]) -> Result<Vec<u32>, CustodyError> {
    expand_custody_columns(subnets, &CustodyParams::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_HEX: &str = "5e17a23d36023ab1106e4ef1cd8657f4214f60776a2602a5ea081fcee2c72b88";

    #[test]
    fn accessor_matches_constant() {
        assert_eq!(
            data_column_sidecar_subnet_count(),
            DATA_COLUMN_SIDECAR_SUBNET_COUNT
        );
    }

    #[test]
    fn string_api_agrees_with_typed_api() {
        let subnets = custody_subnets(ID_HEX, None).unwrap();
        let node_id = NodeId::from_hex(ID_HEX).unwrap();
        assert_eq!(
            subnets,
            compute_custody_subnets(&node_id, DATA_COLUMN_SIDECAR_SUBNET_COUNT).unwrap()
        );
        assert_eq!(subnets, custody_subnets(&format!("0x{ID_HEX}"), None).unwrap());
    }

    #[test]
    fn sample_then_expand_is_deterministic() {
        let first = custody_columns(&custody_subnets(ID_HEX, None).unwrap()).unwrap();
        let second = custody_columns(&custody_subnets(ID_HEX, None).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), CUSTODY_REQUIREMENT as usize);
        // one column per subnet under the default layout
        assert_eq!(first, custody_subnets(ID_HEX, None).unwrap());
    }

    #[test]
    fn subnet_count_override_is_honored() {
        let subnets = custody_subnets(ID_HEX, Some(CUSTODY_REQUIREMENT)).unwrap();
        let expected: Vec<u32> = (0..CUSTODY_REQUIREMENT).collect();
        assert_eq!(subnets, expected);
    }

    #[test]
    fn malformed_node_id_fails_fast() {
        assert!(matches!(
            custody_subnets("not-hex", None),
            Err(CustodyError::InvalidIdentifierFormat { .. })
        ));
    }

    #[test]
    fn zero_subnet_count_fails_fast() {
        assert!(matches!(
            custody_subnets(ID_HEX, Some(0)),
            Err(CustodyError::InvalidConfiguration(_))
        ));
    }
}
