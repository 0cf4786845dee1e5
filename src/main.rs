// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Offlens CLI entrypoint.
//!
//! By default this opens the interactive two-pane viewer for a listing file.
//! Use `--dump` for a plain-text rendering on stdout, `--demo` for the
//! built-in demo listing.

use std::error::Error;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <listing.json> [--dump]\n  {program} --demo [--dump]\n\nThe listing file is the JSON document emitted by the module analyzer\n(disassembly functions plus structured-text chunks).\n\n--dump prints both views as plain text instead of opening the TUI.\n--demo uses a built-in demo listing and cannot be combined with a path."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    dump: bool,
    listing_path: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--dump" => {
                if options.dump {
                    return Err(());
                }
                options.dump = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.listing_path.is_some() {
                    return Err(());
                }
                options.listing_path = Some(arg);
            }
        }
    }

    if options.demo && options.listing_path.is_some() {
        return Err(());
    }
    if !options.demo && options.listing_path.is_none() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "offlens".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let listing = match &options.listing_path {
            Some(path) => offlens::store::load_module_listing(path)?,
            None => offlens::model::demo_listing(),
        };

        if options.dump {
            print!("{}", offlens::render::dump_module(&listing));
            return Ok(());
        }

        offlens::tui::run(listing)
    })();

    if let Err(err) = result {
        eprintln!("offlens: {err}");
        std::process::exit(1);
    }
}
