// Command-line host for mdview
//
// The binary plays two roles. As a converter it turns Markdown into a standalone HTML page, the
// bare `markdown-content` fragment, or a PDF. As a viewer host (`mdview session`) it keeps a
// document session, answers "open" and "export" commands from stdin, and streams notifications
// for the display process to stdout as JSON lines.
//
// Usage:
//  mdview <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  mdview convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  mdview session [file]                  - Run the interactive viewer host
//  mdview generate-css                    - Print the baseline stylesheet
//  mdview display-source                  - Print where the display UI is loaded from
//  mdview --list-formats                  - List conversion formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  mdview notes.md --to pdf -o notes.pdf --extra-page-size letter --extra-landscape

use mdview_cli::{host, logging};

use clap::{Arg, ArgAction, Command, ValueHint};
use mdview_babel::formats::markdown::MarkdownOptions;
use mdview_babel::formats::pdf::{PageSize, PdfEngineKind, PdfSettings};
use mdview_babel::formats::HtmlTheme;
use mdview_babel::publish::{publish, PublishSpec, Published};
use mdview_babel::{ConversionBridge, Format, FormatRegistry, Role};
use mdview_config::{DisplaySource, Loader, MdviewConfig};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

const SUBCOMMANDS: &[&str] = &["convert", "session", "generate-css", "display-source", "help"];

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
    Command::new("mdview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A minimal Markdown viewer host and converter")
        .long_about(
            "mdview renders Markdown to HTML and exports it to PDF.\n\n\
            Commands:\n  \
            - convert: Convert a Markdown file to html, html-fragment or pdf\n  \
            - session: Run the interactive viewer host (open/export over stdin)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdview notes.md --to html -o notes.html        # Standalone HTML page\n  \
            mdview notes.md --to html-fragment             # Fragment sent to the display\n  \
            mdview notes.md --to pdf -o notes.pdf          # PDF via headless Chrome\n  \
            mdview session                                 # Viewer host",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdview.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown file (default command)")
                .long_about(
                    "Convert a Markdown document.\n\n\
                    Supported output formats:\n  \
                    - html:          Standalone HTML page with embedded CSS (.html)\n  \
                    - html-fragment: The <div class=\"markdown-content\"> container only\n  \
                    - pdf:           PDF via headless Chrome or pandoc (requires -o)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    PDF options (--extra-*): engine, page-size, landscape,\n\
                    print-background, theme, css-path",
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
                            Available formats: html, html-fragment, pdf",
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
        .subcommand(
            Command::new("session")
                .about("Run the interactive viewer host")
                .long_about(
                    "Reads commands from stdin, one per line:\n  \
                    open [path]     Open a Markdown file (prompts when no path is given)\n  \
                    export [path]   Export the open document to PDF\n  \
                    menu            Show whether export is available\n  \
                    quit            End the session\n\n\
                    Display notifications are written to stdout as JSON lines;\n\
                    prompts and status lines go to stderr. A FILE given here is\n\
                    opened before the first command is read.",
                )
                .arg(
                    Arg::new("file")
                        .help("Markdown file to open at startup")
                        .value_name("FILE")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS used when converting to HTML or PDF.\n\n\
                    Use this as a starting point for custom styling, then pass the\n\
                    file via --extra-css-path or export.stylesheet in mdview.toml.",
                ),
        )
        .subcommand(
            Command::new("display-source")
                .about("Print where the display process loads its UI from")
                .long_about(
                    "Prints the dev server URL when MDVIEW_ENV=development,\n\
                    otherwise the path of the packaged bundle.",
                ),
        )
}

fn main() {
    if let Err(err) = logging::try_init() {
        eprintln!("Failed to initialize logging: {err}");
    }

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
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
    apply_config_overrides(&mut config, &mut extra_params);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                eprintln!("Error: convert requires an input file and --to");
                std::process::exit(2);
            };
            let from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, from, to, output, &extra_params, &config);
        }
        Some(("session", sub_matches)) => handle_session_command(
            &config,
            sub_matches.get_one::<String>("file").map(PathBuf::from),
        ),
        Some(("generate-css", _)) => handle_generate_css_command(),
        Some(("display-source", _)) => handle_display_source_command(&config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn registry_from_config(config: &MdviewConfig) -> FormatRegistry {
    FormatRegistry::with_settings(
        MarkdownOptions::from(&config.markdown),
        PdfSettings::from(&config.export),
    )
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: Option<&str>,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MdviewConfig,
) {
    let registry = registry_from_config(config);
    let input = Path::new(input);

    let mut spec = PublishSpec::new(input, to)
        .options(format_options_from_config(config, to))
        .options(extra_params.clone());
    if let Some(from) = from {
        spec = spec.from_format(from);
    }
    if let Some(path) = output {
        spec = spec.write_to(Path::new(path));
    }

    match publish(&registry, spec) {
        Ok(Published::Text(text)) => print!("{text}"),
        Ok(Published::Written { path, bytes }) => {
            tracing::info!(output = %path.display(), format = to, bytes, "converted");
        }
        Err(e) => {
            eprintln!("Conversion error: {e}");
            if from.is_none() && registry.detect_input(input).is_none() {
                eprintln!("Please specify --from explicitly");
            }
            if to == "pdf" && output.is_none() {
                eprintln!("Binary formats (like PDF) require an output file. Use -o <path>.");
            }
            std::process::exit(1);
        }
    }
}

/// Handle the session command
fn handle_session_command(config: &MdviewConfig, file: Option<PathBuf>) {
    let bridge = ConversionBridge::new(
        MarkdownOptions::from(&config.markdown),
        PdfSettings::from(&config.export),
    );
    tracing::info!(source = ?config.display.source(), "starting session");

    let stdin = io::stdin();
    if let Err(err) = host::run_session(stdin.lock(), io::stderr(), io::stdout(), bridge, file) {
        eprintln!("Session ended with an error: {err}");
        std::process::exit(1);
    }
}

/// Handle the generate-css command
fn handle_generate_css_command() {
    print!("{}", mdview_babel::formats::get_default_css());
}

/// Handle the display-source command
fn handle_display_source_command(config: &MdviewConfig) {
    match config.display.source() {
        DisplaySource::DevServer(url) => println!("{url}"),
        DisplaySource::Bundle(path) => println!("{}", path.display()),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &MdviewConfig) {
    println!("Available formats:\n");
    for format in registry_from_config(config).formats() {
        let direction = match format.role() {
            Role::Input => "in",
            Role::Output => "out",
        };
        println!(
            "  {:<14} {direction:<4} {}",
            format.name(),
            format.description()
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MdviewConfig {
    let loader = Loader::new().with_optional_file("mdview.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .with_environment()
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn apply_config_overrides(config: &mut MdviewConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("engine") {
        config.export.engine = PdfEngineKind::parse(&raw).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("page-size") {
        config.export.pdf.page_size = PageSize::parse(&raw).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("landscape") {
        config.export.pdf.landscape = parse_bool_arg("landscape", &raw);
    }
    if let Some(raw) = extra_params.remove("print-background") {
        config.export.pdf.print_background = parse_bool_arg("print-background", &raw);
    }

    if let Some(raw) = take_override(extra_params, &["theme"]) {
        config.export.theme = HtmlTheme::from_name(&raw);
    }

    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        config.export.stylesheet = Some(PathBuf::from(path));
    }
}

/// Options the HTML format cannot pick up from the registry settings
fn format_options_from_config(config: &MdviewConfig, to: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if to == "html" {
        if let Some(path) = &config.export.stylesheet {
            params.insert("css-path".to_string(), path.display().to_string());
        }
    }
    params
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
