//! Value Resolver CLI
//!
//! Usage:
//!   value-resolver [OPTIONS] --get <NAME> [FILE]
//!
//! Options:
//!   -g, --get <NAME>          Property name to resolve
//!   -t, --type <TYPE>         Type to convert to [default: string]
//!   -d, --default <VALUE>     Value printed when the property is absent
//!   -e, --env-prefix <PREFIX> Let environment variables override the file
//!   -c, --config <FILE>       Conversion configuration (TOML format)
//!   -h, --help                Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use value_resolver::convert::BYTES_FORMAT;
use value_resolver::{
    Argument, ChainedValueResolver, ConversionConfig, EnvironmentValueResolver, PropertySource,
    ValueResolver,
};

#[derive(Parser)]
#[command(name = "value-resolver")]
#[command(about = "Resolve typed values from TOML property files")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Property name to resolve, e.g. server.port
    #[arg(short, long)]
    get: String,

    /// Type the value is converted to
    #[arg(short = 't', long = "type", value_enum, default_value_t = TargetType::String)]
    target: TargetType,

    /// Value printed when the property is absent or not convertible
    #[arg(short, long)]
    default: Option<String>,

    /// Let environment variables with this prefix override the file
    #[arg(short, long)]
    env_prefix: Option<String>,

    /// Conversion configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetType {
    String,
    Bool,
    Int,
    Uint,
    Float,
    Duration,
    List,
    Bytes,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match ConversionConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ConversionConfig::default(),
    };

    // Read input
    let content = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let source = match PropertySource::from_toml_str(&content) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let chain = build_resolver(source, cli.env_prefix.as_deref(), config);

    debug!(property = %cli.get, target_type = ?cli.target, "resolving");
    match resolve_or_default(&chain, &cli.get, cli.target, cli.default) {
        Some(value) => println!("{}", value),
        None => {
            eprintln!("Error: '{}' is not set or not convertible to {:?}", cli.get, cli.target);
            std::process::exit(1);
        }
    }
}

/// Chain the environment (when a prefix is given) in front of the file
fn build_resolver(
    source: PropertySource,
    env_prefix: Option<&str>,
    config: ConversionConfig,
) -> ChainedValueResolver {
    let mut chain = ChainedValueResolver::new();
    if let Some(prefix) = env_prefix {
        chain = chain.with_source(
            EnvironmentValueResolver::new()
                .with_prefix(prefix)
                .with_config(config.clone()),
        );
    }
    chain.with_source(source.into_resolver().with_config(config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_or_default<R: ValueResolver>(
    resolver: &R,
    name: &str,
    target: TargetType,
    default: Option<String>,
) -> Option<String> {
    resolve(resolver, name, target).or(default)
}

/// Resolve `name` as `target` and render it for output
fn resolve<R: ValueResolver>(resolver: &R, name: &str, target: TargetType) -> Option<String> {
    match target {
        TargetType::String => resolver.get::<String>(name),
        TargetType::Bool => resolver.get::<bool>(name).map(|b| b.to_string()),
        TargetType::Int => resolver.get::<i64>(name).map(|i| i.to_string()),
        TargetType::Uint => resolver.get::<u64>(name).map(|u| u.to_string()),
        TargetType::Float => resolver.get::<f64>(name).map(|x| x.to_string()),
        TargetType::Duration => resolver
            .get::<Duration>(name)
            .map(|d| format!("{}ms", d.as_millis())),
        TargetType::List => resolver
            .get::<Vec<String>>(name)
            .map(|items| items.join("\n")),
        TargetType::Bytes => {
            let arg = Argument::<u64>::of(name).with_format(BYTES_FORMAT);
            resolver.get_argument(name, &arg).map(|b| b.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r#"
name = "demo"
ratio = 0.5
offset = -3
tags = ["a", "b"]

[server]
port = 8080
read-timeout = "1s"
max-body = "10MB"
secure = "yes"
"#;

    fn resolver(env_prefix: Option<&str>) -> ChainedValueResolver {
        let source = PropertySource::from_toml_str(DOCUMENT).expect("Should parse");
        build_resolver(source, env_prefix, ConversionConfig::default())
    }

    fn render(name: &str, target: TargetType) -> Option<String> {
        resolve(&resolver(None), name, target)
    }

    #[test]
    fn test_renders_every_target_type() {
        assert_eq!(render("name", TargetType::String), Some("demo".to_string()));
        assert_eq!(render("server.secure", TargetType::Bool), Some("true".to_string()));
        assert_eq!(render("offset", TargetType::Int), Some("-3".to_string()));
        assert_eq!(render("server.port", TargetType::Uint), Some("8080".to_string()));
        assert_eq!(render("ratio", TargetType::Float), Some("0.5".to_string()));
        assert_eq!(
            render("server.read-timeout", TargetType::Duration),
            Some("1000ms".to_string())
        );
        assert_eq!(render("tags", TargetType::List), Some("a\nb".to_string()));
        assert_eq!(
            render("server.max-body", TargetType::Bytes),
            Some("10485760".to_string())
        );
    }

    #[test]
    fn test_unconvertible_or_missing_is_absent() {
        assert_eq!(render("offset", TargetType::Uint), None);
        assert_eq!(render("name", TargetType::Bool), None);
        assert_eq!(render("server.max-body", TargetType::Uint), None);
        assert_eq!(render("missing", TargetType::String), None);
    }

    #[test]
    fn test_default_used_only_when_absent() {
        let chain = resolver(None);
        let fallback = Some("fallback".to_string());
        assert_eq!(
            resolve_or_default(&chain, "missing", TargetType::String, fallback.clone()),
            fallback
        );
        assert_eq!(
            resolve_or_default(&chain, "name", TargetType::String, fallback),
            Some("demo".to_string())
        );
        assert_eq!(resolve_or_default(&chain, "missing", TargetType::Int, None), None);
    }

    #[test]
    fn test_environment_overrides_file() {
        temp_env::with_vars(
            [("VR_CLI_SERVER_PORT", Some("9090")), ("SERVER_PORT", Some("1"))],
            || {
                assert_eq!(
                    resolve(&resolver(Some("vr-cli")), "server.port", TargetType::Uint),
                    Some("9090".to_string())
                );
                // Without a prefix the environment is not consulted
                assert_eq!(
                    resolve(&resolver(None), "server.port", TargetType::Uint),
                    Some("8080".to_string())
                );
            },
        );
    }

    #[test]
    fn test_file_used_when_environment_unset() {
        temp_env::with_var_unset("VR_CLI_NAME", || {
            assert_eq!(
                resolve(&resolver(Some("vr-cli")), "name", TargetType::String),
                Some("demo".to_string())
            );
        });
    }
}
