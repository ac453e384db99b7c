use lexis_core::{Content, ResolutionOptions, resolve};
use lexis_logger::{LoggerConfig, LoggerError, Rolling};
use std::path::Path;

#[test]
fn test_diagnostics_reach_log_file() {
    let dir = "./target/lexis_logger_test_logs";
    if Path::new(dir).exists() {
        std::fs::remove_dir_all(dir).unwrap();
    }
    std::fs::create_dir_all(dir).unwrap();

    let guard = LoggerConfig::new()
        .log_dir(dir)
        .file_prefix("diagnostics.log")
        .rolling(Rolling::Never)
        .directives("warn")
        .enable_console(false)
        .init()
        .unwrap();
    assert!(guard.is_some());

    // ----------------------------------------------------------------
    // A failed resolution is written through the file layer
    // ----------------------------------------------------------------
    let content: Content = serde_yaml::from_str("en:\n  title: Title\n").unwrap();
    let options = ResolutionOptions::new()
        .locale("en")
        .content(&content)
        .fallback("fb");

    assert_eq!(resolve("title", &options), "Title");
    assert_eq!(resolve("menu.missing", &options), "fb");

    // silenced failures leave no trace
    let silent = options.clone().silent(true);
    assert_eq!(resolve("", &silent), "fb");

    // flushes the non-blocking writer
    drop(guard);

    let logged = std::fs::read_to_string(format!("{}/diagnostics.log", dir)).unwrap();
    println!("Logged: {}", logged);

    assert!(logged.contains("WARN"));
    assert!(logged.contains("menu.missing"));
    assert!(logged.contains("[lexis] 'content' does not contain 'key'"));
    assert!(!logged.contains("'key' is not defined"));

    // ----------------------------------------------------------------
    // Only one global subscriber per process
    // ----------------------------------------------------------------
    let second = LoggerConfig::new().enable_file(false).init();
    assert!(matches!(second, Err(LoggerError::Install(_))));
}
