//! Content digests for uploaded files (SHA-1, hex encoded)

use sha1::{Digest, Sha1};
use std::io::{self, Read};

/// Hex digest of the empty byte sequence.
pub const EMPTY_DIGEST: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Stream a reader to EOF through SHA-1.
///
/// Returns the hex digest and the number of bytes consumed.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<(String, u64)> {
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }

    Ok((hex::encode(hasher.finalize()), total))
}

/// Hex digest of an in-memory buffer
pub fn digest_bytes(content: &[u8]) -> String {
    hex::encode(Sha1::digest(content))
}
