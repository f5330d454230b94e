use arith_frontend::config::runtime::{LogLevel, LoggingPreferences};
use arith_frontend::{logging, Frontend, RuntimeConfig};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
enum Input {
    Expression(String),
    File(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CliOptions {
    input: Option<Input>,
    show_tokens: bool,
    show_ast: bool,
    show_value: bool,
    debug: bool,
    config_path: Option<PathBuf>,
    help: bool,
}

impl CliOptions {
    /// Print the value when no other output was requested
    fn wants_value(&self) -> bool {
        self.show_value || !(self.show_tokens || self.show_ast)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("arith_frontend");

    let options = match parse_options(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [OPTIONS] <expression>", program_name);
            eprintln!("       {} --help", program_name);
            std::process::exit(1);
        }
    };

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let config = match &options.config_path {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("error: [{}] {}", error.error_code(), error);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    init_logging(&config, options.debug)?;

    let source = match &options.input {
        Some(Input::Expression(text)) => text.clone(),
        Some(Input::File(path)) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                eprintln!("error: cannot read {}: {}", path.display(), error);
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("Error: no expression given");
            std::process::exit(1);
        }
    };

    let frontend = Frontend::with_config(&config)?.with_debug(options.debug);

    if options.show_tokens {
        match frontend.tokenize(&source) {
            Ok(tokens) => println!("{}", tokens.diagnostic()),
            Err(error) => {
                eprint!("{}", error.render(&source));
                std::process::exit(1);
            }
        }
    }

    if !(options.show_ast || options.wants_value()) {
        return Ok(());
    }

    match frontend.parse(&source) {
        Ok(expr) => {
            if options.show_ast {
                println!("{}", serde_json::to_string_pretty(&expr)?);
            }
            if options.wants_value() {
                println!("{}", expr.evaluate());
            }
        }
        Err(error) => {
            eprint!("{}", error.render(&source));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn init_logging(config: &RuntimeConfig, debug: bool) -> Result<(), String> {
    let preferences = if debug {
        LoggingPreferences {
            enable_console_logging: true,
            min_log_level: LogLevel::Debug,
            ..config.logging.clone()
        }
    } else {
        config.logging.clone()
    };

    logging::config::init_runtime_preferences(preferences)?;
    logging::init_global_logging()
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--tokens" => options.show_tokens = true,
            "--ast" => options.show_ast = true,
            "--eval" => options.show_value = true,
            "--debug" => options.debug = true,
            "--file" => {
                let path = args.get(i + 1).ok_or("--file requires a path")?;
                set_input(&mut options, Input::File(PathBuf::from(path)))?;
                i += 1;
            }
            "--config" => {
                let path = args.get(i + 1).ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--" => {
                // Everything after is the expression, even if it starts with '-'
                let rest = args[i + 1..].join(" ");
                set_input(&mut options, Input::Expression(rest))?;
                break;
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown option '{}'", other));
            }
            expression => set_input(&mut options, Input::Expression(expression.to_string()))?,
        }
        i += 1;
    }

    if options.input.is_none() && !options.help {
        return Err("missing expression".to_string());
    }

    Ok(options)
}

fn set_input(options: &mut CliOptions, input: Input) -> Result<(), String> {
    if options.input.is_some() {
        return Err("only one expression or --file may be given".to_string());
    }
    options.input = Some(input);
    Ok(())
}

fn print_help(program_name: &str) {
    println!("Arith Frontend v{}", env!("CARGO_PKG_VERSION"));
    println!("Lexer and parser for floating-point arithmetic expressions");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <expression>", program_name);
    println!("    {} [OPTIONS] --file <path>", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --tokens           Print the token stream");
    println!("    --ast              Print the AST as JSON");
    println!("    --eval             Print the value (default when no other output is chosen)");
    println!("    --debug            Log tokens and AST to the console");
    println!("    --config <path>    Load runtime preferences from a TOML file");
    println!("    --file <path>      Read the expression from a file");
    println!("    --help             Show this help message");
    println!();
    println!("NOTES:");
    println!("    Literals need a fractional part: 5.0, not 5");
    println!("    Operator chains group to the right: 8.0-3.0-1.0 is 8.0-(3.0-1.0)");
    println!();
    println!("EXAMPLES:");
    println!("    {} \"(2.0+3.0)*4.0\"", program_name);
    println!("    {} --tokens --ast \"1.5 / 0.5\"", program_name);
    println!();
    println!("BUILD:");
    println!("    {}", arith_frontend::config::build_info::source_info());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&args(&["--tokens", "--ast", "1.0+2.0"])).unwrap();
        assert!(options.show_tokens);
        assert!(options.show_ast);
        assert!(!options.wants_value());
        assert_eq!(options.input, Some(Input::Expression("1.0+2.0".into())));
    }

    #[test]
    fn test_eval_is_default() {
        let options = parse_options(&args(&["1.0"])).unwrap();
        assert!(options.wants_value());
    }

    #[test]
    fn test_file_and_config() {
        let options =
            parse_options(&args(&["--config", "prefs.toml", "--file", "expr.txt", "--debug"]))
                .unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("prefs.toml")));
        assert_eq!(options.input, Some(Input::File(PathBuf::from("expr.txt"))));
        assert!(options.debug);
    }

    #[test]
    fn test_double_dash_allows_leading_minus() {
        let options = parse_options(&args(&["--", "-1.0"])).unwrap();
        assert_eq!(options.input, Some(Input::Expression("-1.0".into())));
    }

    #[test]
    fn test_invalid_options() {
        assert!(parse_options(&args(&[])).is_err());
        assert!(parse_options(&args(&["--bogus", "1.0"])).is_err());
        assert!(parse_options(&args(&["--file"])).is_err());
        assert!(parse_options(&args(&["1.0", "2.0"])).is_err());
        assert!(parse_options(&args(&["--help"])).unwrap().help);
    }
}
