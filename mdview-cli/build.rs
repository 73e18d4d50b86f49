use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the output formats registered by mdview-babel.
// Build scripts can't access the library, so the names are repeated here.
const OUTPUT_FORMATS: &[&str] = &["html", "html-fragment", "pdf"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A minimal Markdown viewer host and converter")
        .arg_required_else_help(true)
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
                .about("Convert a Markdown file")
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
                        .help("Source format")
                        .value_parser(["markdown"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("session")
                .about("Run the interactive viewer host")
                .arg(
                    Arg::new("file")
                        .help("Markdown file to open at startup")
                        .value_name("FILE")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate-css").about("Output the default CSS used for HTML export"),
        )
        .subcommand(
            Command::new("display-source")
                .about("Print where the display process loads its UI from"),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdview", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdview", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdview", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
