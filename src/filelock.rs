use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Result;
use file_lock::FileLock;

pub fn read_file_lock<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>> {
    let lock_opts = file_lock::FileOptions::new().read(true);
    let path = format!("{}", path.as_ref().display());
    let mut file = match FileLock::lock(&path, true, lock_opts) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut data = Vec::new();
    file.file.read_to_end(&mut data)?;
    Ok(Some(data))
}

pub fn write_file_lock<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let lock_opts = file_lock::FileOptions::new()
        .write(true)
        .truncate(true)
        .create(true);
    let path = format!("{}", path.as_ref().display());
    let mut file = FileLock::lock(&path, true, lock_opts)?;
    file.file.write_all(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const TEST_FILE: &str = "_test_filelock";
    const TEST_CONTENT: &[u8] = b"login state data";

    #[test]
    fn test_read_write() {
        let _ = fs::remove_file(TEST_FILE);

        assert!(read_file_lock(TEST_FILE).unwrap().is_none());

        write_file_lock(TEST_FILE, TEST_CONTENT).unwrap();
        let content = read_file_lock(TEST_FILE).unwrap().unwrap();
        assert_eq!(content, TEST_CONTENT);

        // Overwrite truncates previous content
        write_file_lock(TEST_FILE, b"short").unwrap();
        let content = read_file_lock(TEST_FILE).unwrap().unwrap();
        assert_eq!(content, b"short");

        fs::remove_file(TEST_FILE).unwrap();
    }
}
