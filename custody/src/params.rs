use crate::CustodyError;

/// Total number of data columns an encoded block is split into.
pub const NUM_OF_COLUMNS: u32 = 128;

/// Number of gossip subnets the data column sidecars are distributed over.
pub const DATA_COLUMN_SIDECAR_SUBNET_COUNT: u32 = 128;

/// Number of custody subnets every node must sample and serve.
pub const CUSTODY_REQUIREMENT: u32 = 4;

/// Network-wide column layout parameters. Read-only once constructed; the
/// defaults mirror the protocol constants.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CustodyParams {
    pub subnet_count: u32,
    pub num_columns: u32,
}

impl Default for CustodyParams {
    fn default() -> Self {
        Self {
            subnet_count: DATA_COLUMN_SIDECAR_SUBNET_COUNT,
            num_columns: NUM_OF_COLUMNS,
        }
    }
}

impl CustodyParams {
    #[must_use]
    pub fn with_subnet_count(subnet_count: u32) -> Self {
        Self {
            subnet_count,
            ..Default::default()
        }
    }

    /// Number of columns mapped to each subnet. Fails if the subnet count is
    /// zero, exceeds the column count or does not divide it evenly.
    pub fn columns_per_subnet(&self) -> Result<u32, CustodyError> {
        validate_subnet_count(self.subnet_count, self.num_columns)?;
        if self.num_columns % self.subnet_count != 0 {
            return Err(CustodyError::InvalidConfiguration(format!(
                "subnet count {} does not divide {} columns evenly",
                self.subnet_count, self.num_columns
            )));
        }
        Ok(self.num_columns / self.subnet_count)
    }
}

pub(crate) fn validate_subnet_count(subnet_count: u32, num_columns: u32) -> Result<(), CustodyError> {
    if subnet_count == 0 {
        return Err(CustodyError::InvalidConfiguration(
            "subnet count must be positive".to_string(),
        ));
    }
    if subnet_count > num_columns {
        return Err(CustodyError::InvalidConfiguration(format!(
            "subnet count {subnet_count} exceeds {num_columns} columns"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_map_one_column_per_subnet() {
        assert_eq!(CustodyParams::default().columns_per_subnet().unwrap(), 1);
    }

    #[test]
    fn columns_per_subnet_follows_subnet_count() {
        assert_eq!(
            CustodyParams::with_subnet_count(32)
                .columns_per_subnet()
                .unwrap(),
            4
        );
    }

    #[test]
    fn invalid_subnet_counts_are_rejected() {
        for subnet_count in [0, 3, NUM_OF_COLUMNS + 1] {
            assert!(matches!(
                CustodyParams::with_subnet_count(subnet_count).columns_per_subnet(),
                Err(CustodyError::InvalidConfiguration(_))
            ));
        }
    }
}
