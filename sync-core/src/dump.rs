use crate::error::{Result, SyncError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 读取一份表结构文件的全部内容
///
/// 文件不存在或不可读都视为致命错误，错误信息中带上路径
pub fn read_dump<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|e| SyncError::missing_input(path, e))?;
    debug!("读取表结构文件 {} ({} 字节)", path.display(), content.len());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_dump() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CREATE TABLE `t1` (").unwrap();
        writeln!(file, "  `id` int NOT NULL").unwrap();
        writeln!(file, ");").unwrap();

        let content = read_dump(file.path()).unwrap();
        assert!(content.starts_with("CREATE TABLE `t1` ("));
    }

    #[test]
    fn test_read_missing_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sql");
        match read_dump(&path).unwrap_err() {
            SyncError::MissingInput { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
