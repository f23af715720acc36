//! Хранение загруженных файлов в каталоге `upload.dir`.

use std::path::Path;

use chrono::Utc;
use contracts::shared::upload::UploadedFile;
use thiserror::Error;

/// Префикс URL, по которому раздаётся каталог загрузок
pub const FILES_URL_PREFIX: &str = "/files";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Восстановить имя файла, если UTF-8 байты были прочитаны как latin1.
///
/// Браузеры присылают имя в UTF-8, но часть клиентов декодирует его
/// побайтно: "테스트.txt" превращается в "í\u{85}\u{8c}...". Если все символы
/// укладываются в один байт и среди них есть не-ASCII, пробуем собрать из
/// них UTF-8. При неудаче возвращается исходное имя.
pub fn fix_filename_encoding(name: &str) -> String {
    let single_byte = name.chars().all(|c| (c as u32) <= 0xFF);
    let has_high = name.chars().any(|c| (c as u32) >= 0x80);
    if !single_byte || !has_high {
        return name.to_string();
    }

    let bytes: Vec<u8> = name.chars().map(|c| c as u32 as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| name.to_string())
}

/// Последний компонент пути без разделителей (клиент может прислать полный путь)
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Имя на диске должно быть одним компонентом пути
fn validate_filename(filename: &str) -> Result<(), UploadError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if invalid {
        return Err(UploadError::InvalidName(filename.to_string()));
    }
    Ok(())
}

/// Сохранить загруженный файл как `<millis>-<name>`
pub async fn save_upload(
    dir: &Path,
    original_name: &str,
    mimetype: &str,
    bytes: &[u8],
) -> Result<UploadedFile, UploadError> {
    let original_name = fix_filename_encoding(original_name);
    let base = base_name(&original_name);
    let base = if base.is_empty() || base == "." || base == ".." {
        "file"
    } else {
        base
    };
    let filename = format!("{}-{}", Utc::now().timestamp_millis(), base);
    validate_filename(&filename)?;

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&filename), bytes).await?;
    tracing::info!("File uploaded: {} ({} bytes)", filename, bytes.len());

    Ok(UploadedFile {
        path: format!("{}/{}", FILES_URL_PREFIX, filename),
        filename,
        original_name,
        size: bytes.len() as u64,
        mimetype: mimetype.to_string(),
    })
}

/// Удалить ранее загруженный файл
pub async fn delete_file(dir: &Path, filename: &str) -> Result<(), UploadError> {
    validate_filename(filename)?;
    let path = dir.join(filename);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            tracing::info!("File deleted: {}", filename);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(UploadError::NotFound(filename.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_latin1(s: &str) -> String {
        s.bytes().map(|b| b as char).collect()
    }

    #[test]
    fn test_fix_filename_encoding() {
        assert_eq!(fix_filename_encoding(&as_latin1("보고서.pdf")), "보고서.pdf");
        assert_eq!(fix_filename_encoding("보고서.pdf"), "보고서.pdf");
        assert_eq!(fix_filename_encoding("report.pdf"), "report.pdf");
        // not valid UTF-8 when read back as bytes
        assert_eq!(fix_filename_encoding("café.txt"), "café.txt");
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("1700-a.txt").is_ok());
        assert!(validate_filename("../secret").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("a\\b").is_err());
        assert!(validate_filename("").is_err());
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let dir = tempfile::tempdir().unwrap();

        let uploaded = save_upload(dir.path(), &as_latin1("회의록.txt"), "text/plain", b"hello")
            .await
            .unwrap();
        assert_eq!(uploaded.original_name, "회의록.txt");
        assert!(uploaded.filename.ends_with("-회의록.txt"));
        assert_eq!(uploaded.path, format!("/files/{}", uploaded.filename));
        assert_eq!(uploaded.size, 5);
        let content = std::fs::read(dir.path().join(&uploaded.filename)).unwrap();
        assert_eq!(content, b"hello");

        delete_file(dir.path(), &uploaded.filename).await.unwrap();
        assert!(matches!(
            delete_file(dir.path(), &uploaded.filename).await,
            Err(UploadError::NotFound(_))
        ));
        assert!(matches!(
            delete_file(dir.path(), "../x").await,
            Err(UploadError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_client_path_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let uploaded = save_upload(dir.path(), "C:\\Users\\kim\\plan.xlsx", "", b"")
            .await
            .unwrap();
        assert!(uploaded.filename.ends_with("-plan.xlsx"));
        assert!(dir.path().join(&uploaded.filename).exists());
    }
}
