//! Export Data

/// Plain file name of an exported certificate.
pub const EXPORT_FILE_NAME: &str = "health-certificate.pdf";

/// Localized file name offered to browsers that support RFC 5987 names.
pub const EXPORT_DOWNLOAD_NAME: &str = "الشهادة_الصحية_الموحدة.pdf";

/// A rendered certificate PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPdf {
    pub file_name: &'static str,
    pub download_name: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedPdf {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            download_name: EXPORT_DOWNLOAD_NAME,
            bytes,
        }
    }
}
