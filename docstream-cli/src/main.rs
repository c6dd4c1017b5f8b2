// Command-line interface for docstream
//
// This binary compiles HTML and Markdown documents into the ordered edit requests of a
// range-addressed rich-text editing API, and prints them either as the API's batch body
// (docs-json) or as a plain listing (requests).
//
// The inspect command is a development aid: it stops the pipeline at the markup tree, the
// block sequence or the request sequence and prints that stage.
//
// Converting:
//
// The source format is auto-detected from the file extension, while being overwrittable by an
// explicit --from flag. The target defaults to docs-json.
// Usage:
//  docstream <input> [--to <format>] [--from <format>] [--output <file>]  - Convert (default)
//  docstream convert <input> [--to <format>] [--from <format>] [--output <file>]  - Same as above
//  docstream inspect <path> [<transform>]      - Print a pipeline stage (defaults to config)
//  docstream --list-transforms                 - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix; compile settings (coalesce, indent) are applied
// to the configuration, everything else is handed to the output format.
// Example:
//  docstream page.html --extra-compact --extra-coalesce

use docstream_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use docstream_babel::transforms::convert;
use docstream_babel::FormatRegistry;
use docstream_config::{DocstreamConfig, Loader};
use std::collections::HashMap;
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_TARGET: &str = "docs-json";
const LOG_ENV: &str = "DOCSTREAM_LOG";

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

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

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
    Command::new("docstream")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile HTML and Markdown into rich-text editing requests")
        .long_about(
            "docstream compiles semi-structured markup into the ordered edit requests a\n\
            range-addressed rich-text editing API applies to a document.\n\n\
            Commands:\n  \
            - convert: Compile a document and print its requests (default)\n  \
            - inspect: View a pipeline stage (markup tree, blocks, requests)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            docstream page.html                        # Batch body JSON on stdout\n  \
            docstream page.html --to requests          # Plain request listing\n  \
            docstream notes.md -o batch.json           # Write to a file\n  \
            docstream inspect page.html blocks         # View the block sequence",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a docstream.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect a stage of the compile pipeline")
                .long_about(
                    "View a document at different stages of the compile pipeline.\n\n\
                    Transforms:\n  \
                    - tree:          Markup tree outline\n  \
                    - blocks:        Block sequence with styles, lists and cells\n  \
                    - requests:      Request listing (default)\n  \
                    - requests-json: Raw requests as JSON\n\n\
                    Examples:\n  \
                    docstream inspect page.html              # Request listing\n  \
                    docstream inspect page.html tree         # Markup tree\n  \
                    docstream inspect notes.md blocks        # Blocks of a Markdown file",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the input document")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Stage to print. Defaults to inspect.default_transform")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Compile a document into editing requests (default command)")
                .long_about(
                    "Compile a document into editing requests.\n\n\
                    Input formats:\n  \
                    - html:     HTML (.html, .htm, .xhtml)\n  \
                    - markdown: Markdown (.md, .markdown)\n\n\
                    Output formats:\n  \
                    - docs-json: Batch update body (default)\n  \
                    - requests:  One request per line\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    docstream convert page.html --to requests\n  \
                    docstream convert notes.md --document-id abc123 -o batch.json\n  \
                    docstream page.html --extra-compact          # 'convert' is optional",
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
                        .help("Target format (defaults to docs-json)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("document-id")
                        .long("document-id")
                        .value_name("ID")
                        .help("Target document id written into the batch body")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
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

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("Missing input path");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .cloned()
                .unwrap_or_else(|| config.inspect.default_transform.clone());
            let from = resolve_source_format(path, sub_matches);
            handle_inspect_command(path, &from, &transform, &config);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("Missing input path");
            };
            let from = resolve_source_format(input, sub_matches);
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TARGET);
            if let Some(id) = sub_matches.get_one::<String>("document-id") {
                config.convert.document_id = Some(id.clone());
            }
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

/// Install the stderr subscriber; `DOCSTREAM_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// Explicit `--from`, or the format registered for the file extension.
fn resolve_source_format(input: &str, matches: &ArgMatches) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        return from.to_string();
    }
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

fn handle_inspect_command(path: &str, from: &str, transform: &str, config: &DocstreamConfig) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let options = config.compile_options();
    let output =
        transforms::execute_transform(&source, from, transform, &options).unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &DocstreamConfig,
) {
    let registry = FormatRegistry::default();

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

    // Only docs-json knows the configured document id.
    let mut format_options = HashMap::new();
    if to == DEFAULT_TARGET {
        format_options = config.format_options();
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }
    debug!(from, to, options = format_options.len(), "converting {input}");

    let options = config.compile_options();
    let result = convert(&registry, &source, from, to, &options, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
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

fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  tree           - Markup tree outline (after parsing)");
    println!("  blocks         - Block sequence (after extraction)");
    println!("  requests       - Request listing (after generation)");
    println!("  requests-json  - Raw requests as JSON\n");

    let registry = FormatRegistry::default();
    println!("Conversion formats:");
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> DocstreamConfig {
    let loader = Loader::new().with_optional_file("docstream.toml");
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

fn apply_config_overrides(
    config: &mut DocstreamConfig,
    extra_params: &mut HashMap<String, String>,
) {
    if let Some(raw) = take_override(extra_params, &["coalesce", "coalesce-inserts"]) {
        config.convert.coalesce_inserts = parse_bool_arg("coalesce", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["indent", "indent-per-level"]) {
        config.convert.indent_per_level = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid number '{raw}' for --extra-indent");
            std::process::exit(1);
        });
    }
    if let Some(url) = take_override(extra_params, &["base-url"]) {
        config.convert.base_url = Some(url);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
