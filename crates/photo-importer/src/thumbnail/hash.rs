use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use xxhash_rust::xxh64::Xxh64;

const BUFFER_SIZE: usize = 32 * 1024;

/// 64-bit xxHash of the file content as 16 lowercase hex digits. The file
/// is streamed, never loaded whole.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    hash_reader(&mut file)
}

pub fn hash_reader<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Xxh64::new(0);
    let mut buf = vec![0u8; BUFFER_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:016x}", hasher.digest()))
}
