//! Streaming `multipart/form-data` body with a single file part.
//!
//! The body length is known up front so the request can carry a
//! Content-Length and progress can be reported against it.

use crate::upload::error::UploadError;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

pub const FIELD_NAME: &str = "file";
pub const PART_CONTENT_TYPE: &str = "text/plain";

pub struct MultipartBody {
    boundary: String,
    header: Vec<u8>,
    trailer: Vec<u8>,
    file: File,
    file_len: u64,
}

impl MultipartBody {
    /// Opens `path` and prepares the part headers. The file stays open until
    /// the body (or its reader) is dropped.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file = File::open(path).map_err(|source| UploadError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        let metadata = file.metadata().map_err(|source| UploadError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(UploadError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let file_len = metadata.len();

        Ok(Self::with_boundary(
            file,
            file_len,
            &file_name_of(path),
            uuid::Uuid::new_v4().simple().to_string(),
        ))
    }

    fn with_boundary(file: File, file_len: u64, file_name: &str, boundary: String) -> Self {
        let header = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            boundary,
            FIELD_NAME,
            escape_file_name(file_name),
            PART_CONTENT_TYPE
        )
        .into_bytes();
        let trailer = format!("\r\n--{}--\r\n", boundary).into_bytes();

        Self {
            boundary,
            header,
            trailer,
            file,
            file_len,
        }
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Total encoded length in bytes.
    pub fn len(&self) -> u64 {
        self.header.len() as u64 + self.file_len + self.trailer.len() as u64
    }

    pub fn into_reader(self) -> impl Read + Send + 'static {
        Cursor::new(self.header)
            .chain(self.file.take(self.file_len))
            .chain(Cursor::new(self.trailer))
    }
}

/// Last path segment, or the whole path when there is none.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn escape_file_name(name: &str) -> String {
    name.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn encode(body: MultipartBody) -> Vec<u8> {
        let mut out = Vec::new();
        body.into_reader().read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn encodes_single_file_part() {
        let tmp = temp_file_with(b"hello world");
        let file = File::open(tmp.path()).unwrap();
        let body = MultipartBody::with_boundary(file, 11, "notes.txt", "XYZ".to_string());

        assert_eq!(body.content_type(), "multipart/form-data; boundary=XYZ");
        let expected = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
            Content-Type: text/plain\r\n\
            \r\n\
            hello world\r\n\
            --XYZ--\r\n";
        assert_eq!(body.len(), expected.len() as u64);
        assert_eq!(String::from_utf8(encode(body)).unwrap(), expected);
    }

    #[test]
    fn length_matches_encoded_bytes() {
        let contents = vec![7u8; 70_000];
        let tmp = temp_file_with(&contents);
        let body = MultipartBody::from_path(tmp.path()).unwrap();
        let announced = body.len();
        assert_eq!(encode(body).len() as u64, announced);
    }

    #[test]
    fn body_is_capped_at_announced_length() {
        let tmp = temp_file_with(b"0123456789");
        let file = File::open(tmp.path()).unwrap();
        // Pretend the file was shorter when it was measured.
        let body = MultipartBody::with_boundary(file, 4, "a.txt", "B".to_string());
        let announced = body.len();
        let bytes = encode(body);
        assert_eq!(bytes.len() as u64, announced);
        assert!(String::from_utf8(bytes).unwrap().contains("\r\n\r\n0123\r\n--B--"));
    }

    #[test]
    fn random_boundaries_differ() {
        let tmp = temp_file_with(b"x");
        let a = MultipartBody::from_path(tmp.path()).unwrap();
        let b = MultipartBody::from_path(tmp.path()).unwrap();
        assert_ne!(a.content_type(), b.content_type());
        assert_eq!(a.boundary.len(), 32);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = MultipartBody::from_path(Path::new("/definitely/not/here.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, UploadError::OpenFile { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = MultipartBody::from_path(dir.path()).err().unwrap();
        assert!(matches!(err, UploadError::NotAFile { .. }));
        assert_eq!(
            err.to_string(),
            format!("{} is not a regular file", dir.path().display())
        );
    }

    #[test]
    fn file_name_is_last_segment() {
        assert_eq!(file_name_of(Path::new("/tmp/dir/report.pdf")), "report.pdf");
        assert_eq!(file_name_of(Path::new("report.pdf")), "report.pdf");
        assert_eq!(file_name_of(&PathBuf::from("/")), "/");
    }

    #[test]
    fn quotes_and_newlines_are_escaped() {
        assert_eq!(escape_file_name("a\"b\r\nc"), "a%22b%0D%0Ac");
    }
}
