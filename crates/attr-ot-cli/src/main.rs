//! # attr-ot CLI
//!
//! Command-line utilities for running the attribute reconciliation
//! operations on inline JSON, for testing and debugging.

use anyhow::{Context, Result};
use attr_ot_core::{compose, diff, invert, transform, AttributeMap};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "compose" => {
            let (left, right) = take_operands(&args, "compose <base> <update> [--keep-remove]");
            let base = parse_map(left)?;
            let update = parse_map(right)?;
            let keep_remove = take_flag(&args, "--keep-remove");
            print_optional(compose(Some(&base), Some(&update), keep_remove));
        }
        "diff" => {
            let (left, right) = take_operands(&args, "diff <a> <b>");
            let a = parse_map(left)?;
            let b = parse_map(right)?;
            print_optional(diff(Some(&a), Some(&b)));
        }
        "invert" => {
            let (left, right) = take_operands(&args, "invert <update> <base>");
            let update = parse_map(left)?;
            let base = parse_map(right)?;
            println!("{}", invert(Some(&update), Some(&base)));
        }
        "transform" => {
            let (left, right) = take_operands(&args, "transform <a> <b> [--priority]");
            // transform distinguishes "not a map" from "empty map"
            let a = parse_map_opt(left)?;
            let b = parse_map_opt(right)?;
            let priority = take_flag(&args, "--priority");
            print_optional(transform(a.as_ref(), b.as_ref(), priority));
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn take_operands<'a>(args: &'a [String], usage: &str) -> (&'a str, &'a str) {
    if args.len() < 4 {
        eprintln!("Usage: attr-ot {usage}");
        std::process::exit(1);
    }
    (&args[2], &args[3])
}

fn take_flag(args: &[String], flag: &str) -> bool {
    args.iter().skip(4).any(|arg| arg == flag)
}

fn parse_map(raw: &str) -> Result<AttributeMap> {
    AttributeMap::parse(raw).with_context(|| format!("failed to parse argument: {raw}"))
}

fn parse_map_opt(raw: &str) -> Result<Option<AttributeMap>> {
    AttributeMap::parse_opt(raw).with_context(|| format!("failed to parse argument: {raw}"))
}

fn print_optional(result: Option<AttributeMap>) {
    match result {
        Some(map) => println!("{map}"),
        None => println!("null"),
    }
}

fn print_help() {
    println!(
        r#"attr-ot CLI

USAGE:
    attr-ot <COMMAND> <JSON> <JSON> [OPTIONS]

COMMANDS:
    compose <base> <update> [--keep-remove]
        Fold an update onto a base state. With --keep-remove, deletion
        markers (null values) survive in the output instead of being
        finalized.
    diff <a> <b>
        Minimal update that turns state a into state b.
    invert <update> <base>
        Update that undoes <update>, given the base it was applied to.
    transform <a> <b> [--priority]
        Residual of b after concurrent a has been applied. With
        --priority, a keeps every key it defines.
    help
        Show this help message.

Arguments are inline JSON objects; any other JSON value is treated as an
empty map (for transform: as an absent input). A null member is the
deletion marker. The absent result prints as null.

EXAMPLES:
    attr-ot compose '{{"bold":true}}' '{{"color":"red"}}'
    attr-ot diff '{{"bold":true}}' '{{"italic":true}}'
    attr-ot invert '{{"color":"red"}}' '{{"color":"blue"}}'
    attr-ot transform '{{"bold":true}}' '{{"bold":true,"italic":true}}' --priority
"#
    );
}
