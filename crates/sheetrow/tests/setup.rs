use assert_cmd::cmd::Command;

#[allow(dead_code)]
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

pub fn make_cli() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).expect("Failed to find binary");
    // Keep the environment from changing what's under test.
    for var in [
        "SHEETROW_CREDENTIALS",
        "SHEETROW_SPREADSHEET_ID",
        "SHEETROW_SHEET",
        "SHEETROW_API_URL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
