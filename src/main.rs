// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use iso_list::commands::list::ListCommand;
use iso_list::commands::resolve::{ResolveCommand, ResolveOptions};
use iso_list::commands::validate::ValidateCommand;
use iso_list::config::IsoListConfig;
use iso_list::error::{Result, format_error_chain, format_error_with_color, get_exit_code};
use iso_list::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iso-list")]
#[command(author, version, about = "Find the latest installer images of OS distributions", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./iso-list.toml when present)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the latest image of every configured distribution
    #[command(visible_alias = "r")]
    Resolve {
        /// Resolve only this distribution
        name: Option<String>,

        /// Where to write the JSON results
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the JSON results instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Number of distributions resolved concurrently
        #[arg(long, value_name = "N")]
        parallel: Option<usize>,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,
    },

    /// Check the distribution catalog for malformed entries
    Validate,

    /// List configured distributions
    #[command(visible_alias = "ls")]
    List,
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match IsoListConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Resolve {
            name,
            output,
            stdout,
            parallel,
            no_progress,
        } => {
            let command = ResolveCommand::new(&config)?;
            command.execute(&ResolveOptions {
                name,
                output,
                stdout,
                parallel,
                no_progress,
            })
        }
        Commands::Validate => {
            let command = ValidateCommand::new(&config)?;
            command.execute()
        }
        Commands::List => {
            let command = ListCommand::new(&config)?;
            command.execute()
        }
    })();

    if let Err(e) = result {
        eprintln!(
            "{}",
            format_error_with_color(&e, std::io::stderr().is_terminal())
        );
        std::process::exit(get_exit_code(&e));
    }
}
