/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * SPDX-License-Identifier: MPL-2.0
 */

use std::path::PathBuf;

use clap::{ColorChoice, CommandFactory, Parser};

#[deny(missing_docs)]
/// The command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "z80asm",
    version,
    about = "Z80 assembly parser",
    long_about = "Parses a Z80 assembly source file, and reports every grammar error it contains.",
    arg_required_else_help = true,
    help_expected = true
)]
pub struct Cli {
    /// Controls when to use color
    #[arg(long, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Abort after printing this many errors
    #[arg(short = 'X', long, default_value_t = 64, value_name = "max")]
    max_errors: usize,

    /// Path to the file to parse
    input: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub max_errors: usize,
}

impl Cli {
    pub fn finish(self) -> Result<(Options, PathBuf), ()> {
        apply_color_choice(self.color);

        if self.max_errors == 0 {
            Cli::command()
                .error(
                    clap::error::ErrorKind::InvalidValue,
                    "The maximum error count cannot be zero",
                )
                .print()
                .unwrap();
            return Err(());
        }

        Ok((
            Options {
                max_errors: self.max_errors,
            },
            self.input,
        ))
    }
}

fn apply_color_choice(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => yansi::enable(),
        ColorChoice::Never => yansi::disable(),
        ColorChoice::Auto => yansi::whenever(yansi::Condition::TTY_AND_COLOR),
    }
}
