//! k256 implementation of `ecrecover`. More about it in [`crate::secp256k1`].
use k256::ecdsa::{Error, RecoveryId, Signature, VerifyingKey};
use primitives::{keccak256, B256, B512};

/// Recovers the signer of `msg` and returns its address left-padded to 32 bytes.
///
/// This function is using the `k256` crate.
///
/// `sig` must already be low-s, the caller rejects the upper half of the order.
pub fn ecrecover(sig: &B512, recid: u8, msg: &B256) -> Result<B256, Error> {
    let sig = Signature::from_slice(sig.as_slice())?;
    let recid = RecoveryId::from_byte(recid).ok_or_else(Error::new)?;

    let recovered_key = VerifyingKey::recover_from_prehash(&msg[..], &sig, recid)?;
    let mut hash = keccak256(
        &recovered_key
            .to_encoded_point(/* compress = */ false)
            .as_bytes()[1..],
    );

    // truncate to 20 bytes
    hash[..12].fill(0);
    Ok(hash)
}
