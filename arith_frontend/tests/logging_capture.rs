//! Events emitted through the global logger during a parse.
//!
//! Kept in its own test binary: the global logger can be installed once
//! per process.

use arith_frontend::logging::{self, codes, LogLevel, LoggingService, MemoryLogger};
use arith_frontend::{Frontend, RuntimeConfig};
use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
static SERIAL: Mutex<()> = Mutex::new(());

fn memory_logger() -> Arc<MemoryLogger> {
    MEMORY
        .get_or_init(|| {
            let memory = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(memory.clone(), LogLevel::Debug);
            logging::init_global_logging_with_service(Arc::new(service)).unwrap();
            memory
        })
        .clone()
}

#[test]
fn successful_parse_logs_each_stage() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let memory = memory_logger();
    let frontend = Frontend::new().unwrap();
    memory.clear();

    frontend.parse("1.0 + 2.0").unwrap();

    assert!(memory.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
    assert!(memory.has_success_with_code(codes::success::AST_CONSTRUCTION_COMPLETE));
    assert!(memory.has_success_with_code(codes::success::FRONTEND_PARSE_COMPLETE));
    assert!(memory.get_errors().is_empty());
}

#[test]
fn each_failure_is_logged_once() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let memory = memory_logger();
    let frontend = Frontend::new().unwrap();

    memory.clear();
    frontend.parse("5.").unwrap_err();
    let errors = memory.get_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::lexical::NO_VIABLE_TOKEN);

    memory.clear();
    frontend.parse("(1.0").unwrap_err();
    assert_eq!(
        memory.get_events_with_code(codes::syntax::UNEXPECTED_TOKEN).len(),
        1
    );
    assert!(!memory.has_success_with_code(codes::success::FRONTEND_PARSE_COMPLETE));
}

#[test]
fn debug_mode_logs_tokens() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let memory = memory_logger();
    let frontend = Frontend::new().unwrap().with_debug(true);
    memory.clear();

    frontend.parse("1.0").unwrap();

    let debug_events: Vec<_> = memory
        .get_events()
        .into_iter()
        .filter(|event| event.level == LogLevel::Debug)
        .collect();
    assert!(debug_events.iter().any(|event| event.message == "Token matched"));
    assert!(debug_events.iter().any(|event| event.message == "Parsed expression"));
}

#[test]
fn loading_a_config_file_is_logged() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let memory = memory_logger();
    memory.clear();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[syntax]\nmax_parse_depth = 8\n").unwrap();
    RuntimeConfig::load(file.path()).unwrap();

    let loaded = memory.get_events_with_code(codes::success::CONFIGURATION_LOADED);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].context.get("max_parse_depth").map(String::as_str), Some("8"));
}

#[test]
fn second_initialization_is_logged_as_failure() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let memory = memory_logger();
    memory.clear();

    assert!(logging::init_global_logging().is_err());
    assert!(memory.has_error_with_code(codes::system::INITIALIZATION_FAILURE));
}
