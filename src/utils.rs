/// Converts a big-endian (network order) field into a host-order `u32`.
pub(crate) const fn u32_from_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}
