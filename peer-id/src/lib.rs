//! Adapter from libp2p peer ids to the node id consumed by the custody
//! sampler. Conversion is only possible for secp256k1 and ed25519 peer ids,
//! whose public key is embedded in the peer id multihash.

use std::str::FromStr as _;

use libp2p_identity::{DecodingError, KeyType, PeerId, PublicKey};
use peerdas_custody::{
    compute_custody_subnets, CustodyError, NodeId, DATA_COLUMN_SIDECAR_SUBNET_COUNT,
};
use sha3::{Digest as _, Keccak256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeerIdError {
    #[error("unable to parse peer id {id:?}: {reason}")]
    InvalidPeerIdFormat { id: String, reason: String },
    #[error("cannot decode public key from peer id {peer_id}: {source}")]
    UndecodableKey {
        peer_id: PeerId,
        source: DecodingError,
    },
    #[error("unsupported key type {key_type} for peer {peer_id}")]
    UnsupportedKeyType { peer_id: PeerId, key_type: KeyType },
    #[error(transparent)]
    Custody(#[from] CustodyError),
}

/// Derives the node id from a libp2p peer id.
///
/// The peer id byte representation must be an identity multihash, i.e. 2
/// length bytes + 4 protobuf header bytes + the encoded public key. The node
/// id is the keccak256 hash of the key bytes (for secp256k1 keys, the
/// uncompressed point without its format byte).
pub fn peer_id_to_node_id(peer_id: &PeerId) -> Result<NodeId, PeerIdError> {
    let pk_bytes = &peer_id.to_bytes()[2..];
    let public_key =
        PublicKey::try_decode_protobuf(pk_bytes).map_err(|source| PeerIdError::UndecodableKey {
            peer_id: *peer_id,
            source,
        })?;
    tracing::debug!(%peer_id, key_type = %public_key.key_type(), "deriving node id");

    let digest = if let Ok(key) = public_key.clone().try_into_secp256k1() {
        Keccak256::digest(&key.to_bytes_uncompressed()[1..])
    } else if let Ok(key) = public_key.clone().try_into_ed25519() {
        Keccak256::digest(key.to_bytes())
    } else {
        return Err(PeerIdError::UnsupportedKeyType {
            peer_id: *peer_id,
            key_type: public_key.key_type(),
        });
    };
    Ok(NodeId::new(digest.into()))
}

/// Computes the custody subnets for a base58-encoded libp2p peer id, falling
/// back to [`DATA_COLUMN_SIDECAR_SUBNET_COUNT`] when no subnet count is
/// given.
pub fn custody_subnets_from_peer_id(
    peer_id: &str,
    subnet_count: Option<u32>,
) -> Result<Vec<u32>, PeerIdError> {
    let peer_id = PeerId::from_str(peer_id).map_err(|e| PeerIdError::InvalidPeerIdFormat {
        id: peer_id.to_string(),
        reason: e.to_string(),
    })?;
    let node_id = peer_id_to_node_id(&peer_id)?;
    let subnet_count = subnet_count.unwrap_or(DATA_COLUMN_SIDECAR_SUBNET_COUNT);
    Ok(compute_custody_subnets(&node_id, subnet_count)?)
}
