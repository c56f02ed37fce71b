// Command-line interface for mdmend
//
// This binary provides commands for inspecting and converting markdown
// documents through the mdmend repair pipeline.
//
// The main role of the mdmend program is to interface with markdown
// content: parsing it, repairing paragraph fragmentation, and rendering it
// to another format. The core capabilities live in the mdmend library;
// this crate is a thin shell over its format registry and transform
// pipeline.
//
// Converting:
//
// The conversion needs a from/to pair. The from format is auto-detected
// from the file extension and can be overridden with --from.
// Usage:
//  mdmend <input> --to <format> [--from <format>] [--output <file>]
//  mdmend convert <input> --to <format> ...   - same as above (explicit)
//  mdmend inspect <path> [<transform>]        - view the document tree
//  mdmend --list-transforms                   - list inspect transforms

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use mdmend::formats::html::HtmlFormat;
use mdmend::formats::markdown::{MarkdownExtensions, MarkdownFormat};
use mdmend::formats::treeviz::TreevizFormat;
use mdmend::transforms::Pipeline;
use mdmend::{Document, FormatRegistry};
use mdmend_config::{Loader, MendConfig};
use std::fs;

fn build_cli() -> Command {
    Command::new("mdmend")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for repairing and converting markdown documents")
        .long_about(
            "mdmend is a command-line tool for working with markdown documents.\n\n\
            Commands:\n  \
            - inspect: View the parsed document tree (before or after repair)\n  \
            - convert: Repair a document and render it to another format\n\n\
            Examples:\n  \
            mdmend inspect file.md                  # Tree visualization after repair\n  \
            mdmend inspect file.md ast-json --raw   # Raw parse as JSON\n  \
            mdmend file.md --to html                # Render to HTML (stdout)\n  \
            mdmend file.md --to markdown -o out.md  # Normalize fragmented markdown",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdmend.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the document tree of a markdown file")
                .long_about(
                    "View the document tree at different stages.\n\n\
                    Transforms:\n  \
                    - ast-treeviz:  tree visualization with icons (default)\n  \
                    - ast-json:     tree as pretty-printed JSON\n\n\
                    By default the repair pipeline runs before inspection;\n\
                    pass --raw to see the tree exactly as parsed.\n\n\
                    Examples:\n  \
                    mdmend inspect file.md                # Repaired tree\n  \
                    mdmend inspect file.md ast-json       # Repaired tree as JSON\n  \
                    mdmend inspect file.md --raw          # Parse output, no repair",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Inspect transform to apply. Defaults to 'ast-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .help("Skip the repair pipeline and show the raw parse")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a markdown document to another format (default command)")
                .long_about(
                    "Repair a markdown document and render it to another format.\n\n\
                    Supported target formats:\n  \
                    - markdown: normalized CommonMark (.md)\n  \
                    - html:     HTML (.html)\n  \
                    - treeviz:  tree visualization\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    mdmend convert input.md --to html            # Render HTML (stdout)\n  \
                    mdmend convert input.md --to markdown        # Normalize markdown\n  \
                    mdmend input.md --to html -o out.html        # 'convert' is optional",
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
                        .required(true)
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
                    Arg::new("no-merge")
                        .long("no-merge")
                        .help("Skip the paragraph fragment repair")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Try normal parsing first. If the first argument looks like a file
    // rather than a subcommand, inject "convert" and retry.
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "inspect"
                && args[1] != "convert"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        for transform in transforms::AVAILABLE_TRANSFORMS {
            println!("{transform}");
        }
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("ast-treeviz");
            let raw = sub_matches.get_flag("raw");
            handle_inspect_command(path, transform, raw, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from_arg = sub_matches.get_one::<String>("from");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            // Auto-detect --from if not provided
            let from = if let Some(f) = from_arg {
                f.to_string()
            } else {
                let registry = build_registry(&config);
                match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let no_merge = sub_matches.get_flag("no-merge");
            handle_convert_command(input, &from, to, output, no_merge, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(path: Option<&str>) -> MendConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("mdmend.toml"),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    })
}

/// Build a registry whose formats follow the loaded configuration.
fn build_registry(config: &MendConfig) -> FormatRegistry {
    let extensions: MarkdownExtensions = (&config.markdown.extensions).into();
    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat::new(extensions.clone()));
    registry.register(HtmlFormat::new(extensions, (&config.convert.html).into()));
    registry.register(TreevizFormat::new(config.inspect.ast.show_line_numbers));
    registry
}

fn repair_pipeline(config: &MendConfig, skip: bool) -> Pipeline {
    if skip || !config.transforms.merge_fragments {
        Pipeline::empty()
    } else {
        Pipeline::standard()
    }
}

fn parse_input(path: &str, from: &str, config: &MendConfig) -> Document {
    let registry = build_registry(config);

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, raw: bool, config: &MendConfig) {
    let mut doc = parse_input(path, "markdown", config);
    repair_pipeline(config, raw).run(&mut doc);

    let output = transforms::execute_transform(&doc, transform, config).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    no_merge: bool,
    config: &MendConfig,
) {
    let registry = build_registry(config);

    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut doc = parse_input(input, from, config);
    repair_pipeline(config, no_merge).run(&mut doc);

    let result = registry.serialize(&doc, to).unwrap_or_else(|e| {
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
        None => {
            print!("{result}");
        }
    }
}
