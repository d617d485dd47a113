// Command-line interface for velvet
//
// This binary converts between comment-delimited block markup and content-item JSON.
// The conversion itself lives in the velvet-babel crate; this crate only reads files, layers
// configuration and reports errors.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  velvet <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  velvet convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  velvet --list-formats                                                     - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the target format.
// Example:
//  velvet post.html --to npf --extra-pretty
//  velvet post.json --to blocks --extra-gallery-min-images 3

use clap::{Arg, ArgAction, Command, ValueHint};
use log::LevelFilter;
use std::collections::HashMap;
use std::fs;
use velvet_babel::formats::blocks::GALLERY_MIN_IMAGES;
use velvet_babel::formats::npf::PRETTY;
use velvet_babel::FormatRegistry;
use velvet_config::{Loader, VelvetConfig, LOCAL_CONFIG_FILE};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            // A following token that is not a flag is this key's value
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("velvet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between block markup and content-item JSON")
        .long_about(
            "velvet converts posts between comment-delimited block markup and the flat\n\
            content-item JSON document.\n\n\
            Formats:\n  \
            - blocks: Comment-delimited block markup (.html, .htm, .blocks)\n  \
            - npf:    Content-item JSON (.json, .npf)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            velvet post.html --to npf                       # Blocks to JSON (stdout)\n  \
            velvet post.html --to npf --extra-pretty        # Indented JSON\n  \
            velvet post.json --to blocks -o post.html       # JSON to a markup file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a velvet.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log recovery decisions (sets the log filter to debug)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert a post between formats.\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    velvet convert post.html --to npf             # Markup to JSON (stdout)\n  \
                    velvet convert post.json --to blocks -o out.html\n  \
                    velvet post.html --to npf                     # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: blocks, npf\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading file argument means the convert subcommand was left out
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(&config, matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("an input file is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("a target format is required (--to)");
            };

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    match registry.detect_format_from_filename(input) {
                        Some(detected) => detected,
                        None => {
                            eprintln!("Error: Could not detect format from filename '{input}'");
                            eprintln!("Please specify --from explicitly");
                            std::process::exit(1);
                        }
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &VelvetConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    log::debug!("converting {input} from {from} to {to}");
    let post = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let format_options = format_options(config, to, extra_params);
    let result = registry
        .serialize_with_options(&post, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<8} {} (.{})",
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> VelvetConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Configured level first, then `RUST_LOG`, then `--verbose`.
fn log_builder(config: &VelvetConfig, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&config.log.level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
}

fn init_logging(config: &VelvetConfig, verbose: bool) {
    let _ = log_builder(config, verbose).format_timestamp(None).try_init();
}

/// Moves option extras that shadow configuration keys into the configuration.
fn apply_config_overrides(config: &mut VelvetConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove(PRETTY) {
        config.convert.npf.pretty = parse_bool_arg(PRETTY, &raw);
    }

    if let Some(raw) = take_override(extra_params, &[GALLERY_MIN_IMAGES, "gallery_min_images"]) {
        config.convert.blocks.gallery_min_images = match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n,
            _ => {
                eprintln!(
                    "Invalid value '{raw}' for --extra-{GALLERY_MIN_IMAGES}: expected a positive integer"
                );
                std::process::exit(1);
            }
        };
    }
}

/// Configured options for the target format, with any remaining extras layered on top.
fn format_options(
    config: &VelvetConfig,
    to: &str,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = config.convert.format_options(to);
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn take_override(extra_params: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| extra_params.remove(*key))
}

fn parse_bool_arg(key: &str, raw: &str) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            eprintln!("Invalid boolean value '{raw}' for --extra-{key}");
            std::process::exit(1);
        }
    }
}
