use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use sheetrow_core::config::{
    DEFAULT_CREDENTIALS_PATH,
    DEFAULT_SHEET_NAME,
    DEFAULT_SPREADSHEET_ID,
    TableConfig,
};
use sheetrow_http::Url;
use sheetrow_http::google::sheets::DEFAULT_SHEETS_API_URL;

#[derive(Debug, Parser)]
#[clap(name = "sheetrow")]
#[clap(about = "Validate the header of a Google Sheets tab, then write, update and append rows")]
pub struct Args {
    /// Path to the service account key file.
    #[clap(long, env = "SHEETROW_CREDENTIALS", default_value = DEFAULT_CREDENTIALS_PATH)]
    pub credentials: PathBuf,

    /// Id of the spreadsheet holding the table.
    #[clap(long, env = "SHEETROW_SPREADSHEET_ID", default_value = DEFAULT_SPREADSHEET_ID)]
    pub spreadsheet_id: String,

    /// Name of the sheet (tab) holding the table.
    #[clap(long, env = "SHEETROW_SHEET", default_value = DEFAULT_SHEET_NAME)]
    pub sheet: String,

    /// Base url of the Sheets api.
    ///
    /// (Internal)
    #[clap(long, env = "SHEETROW_API_URL", default_value = DEFAULT_SHEETS_API_URL, hide = true)]
    pub api_url: Url,

    /// Clear the header row before validating it, causing it to be written
    /// again.
    #[clap(long)]
    pub reset_header: bool,

    /// Log output format.
    #[clap(long, value_enum, default_value_t = LogFormatArg::Human)]
    pub log_format: LogFormatArg,

    /// Increase log verbosity, may be repeated.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn table_config(&self) -> TableConfig {
        TableConfig::new(self.spreadsheet_id.clone(), self.sheet.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Human,
    Json,
}

impl From<LogFormatArg> for logutil::LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Human => logutil::LogFormat::HumanReadable,
            LogFormatArg::Json => logutil::LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["sheetrow"]).unwrap();
        assert_eq!(PathBuf::from("credentials.json"), args.credentials);
        assert_eq!(TableConfig::default(), args.table_config());
        assert_eq!("https://sheets.googleapis.com/", args.api_url.as_str());
        assert!(!args.reset_header);
        assert_eq!(LogFormatArg::Human, args.log_format);
        assert_eq!(0, args.verbose);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "sheetrow",
            "--credentials",
            "/etc/sheetrow/key.json",
            "--spreadsheet-id",
            "abc",
            "--sheet",
            "People",
            "--reset-header",
            "--log-format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(PathBuf::from("/etc/sheetrow/key.json"), args.credentials);
        assert_eq!(TableConfig::new("abc", "People"), args.table_config());
        assert!(args.reset_header);
        assert_eq!(LogFormatArg::Json, args.log_format);
        assert_eq!(2, args.verbose);
    }

    #[test]
    fn rejects_positional_args() {
        Args::try_parse_from(["sheetrow", "extra"]).unwrap_err();
    }
}
