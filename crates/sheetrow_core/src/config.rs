/// Spreadsheet used when none is configured.
pub const DEFAULT_SPREADSHEET_ID: &str = "1FLfk_jy3Hao0hBem2jtCdOBPtYXeYRxBJ51tahSanPQ";

/// Sheet (tab) holding the table when none is configured.
pub const DEFAULT_SHEET_NAME: &str = "Users";

/// Service account key file read when none is configured.
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";

/// Identifies the table inside the remote spreadsheet service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

impl TableConfig {
    pub fn new(spreadsheet_id: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        TableConfig {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SPREADSHEET_ID, DEFAULT_SHEET_NAME)
    }
}
