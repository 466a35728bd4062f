use itertools::Itertools;

use crate::params::CustodyParams;
use crate::CustodyError;

/// Expands custody subnets into the data column indices they cover, sorted
/// ascending and deduplicated.
///
/// Subnet `s` owns the interleaved columns `s + k * subnet_count`, keeping a
/// subnet's columns maximally spread over the index range so a contiguous
/// loss of columns degrades every subnet evenly.
pub fn expand_custody_columns(
    subnets: &[u32],
    params: &CustodyParams,
) -> Result<Vec<u32>, CustodyError> {
    let columns_per_subnet = params.columns_per_subnet()?;
    if let Some(&index) = subnets.iter().find(|&&subnet| subnet >= params.subnet_count) {
        return Err(CustodyError::IndexOutOfRange {
            index,
            subnet_count: params.subnet_count,
        });
    }
    Ok(subnets
        .iter()
        .flat_map(|&subnet| {
            (0..columns_per_subnet).map(move |k| subnet + k * params.subnet_count)
        })
        .sorted_unstable()
        .dedup()
        .collect())
}
