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

use clap::{CommandFactory, Parser};
use log::warn;
use sc2fla::commands::AppContext;
use sc2fla::commands::codec::CodecCommand;
use sc2fla::commands::process::ProcessCommand;
use sc2fla::commands::setup::SetupCommand;
use sc2fla::commands::status::StatusCommand;
use sc2fla::config::ConfigLoadOutcome;
use sc2fla::convert::{ConvertOptions, ReportingConverter};
use sc2fla::error::{Result, format_error_chain, get_exit_code};
use sc2fla::logging;
use sc2fla::paths::{home, resolve_home};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sc2fla")]
#[command(author, version, about = "Convert SC game assets with the SC2FLA toolkit", long_about = None)]
struct Cli {
    /// Process a .sc file, or every .sc file directly inside a directory
    #[arg(short, long, value_name = "FILE/DIR")]
    process: Option<PathBuf>,

    /// Dump raw texture data during conversion
    #[arg(long)]
    dump_raw: bool,

    /// Dump textures as PNG during conversion
    #[arg(long)]
    dump_png: bool,

    /// Sort layers during conversion
    #[arg(short, long)]
    sort_layers: bool,

    /// Decompress a file into <FILE>.dec
    #[arg(short = 'x', long, value_name = "FILE")]
    decompress: Option<PathBuf>,

    /// Compress a file into <FILE>.cmp (zlib stream in an SC frame, not
    /// readable by LZMA-based SC tools)
    #[arg(short, long, value_name = "FILE")]
    compress: Option<PathBuf>,

    /// Show platform information
    #[arg(long)]
    platform: bool,

    /// Show tool availability
    #[arg(long)]
    tools: bool,

    /// Show the loaded configuration
    #[arg(long)]
    config: bool,

    /// Prepare the toolkit home directory
    #[arg(long)]
    setup: bool,

    /// Download published Windows tools during setup
    #[arg(long, requires = "setup")]
    download: bool,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn has_action(&self) -> bool {
        self.process.is_some()
            || self.decompress.is_some()
            || self.compress.is_some()
            || self.platform
            || self.tools
            || self.config
            || self.setup
            || self.dump_raw
            || self.dump_png
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            dump_raw: self.dump_raw,
            dump_png: self.dump_png,
            sort_layers: self.sort_layers,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if !cli.has_action() {
        let _ = Cli::command().print_help();
        return;
    }

    let home_dir = match resolve_home() {
        Ok(home_dir) => home_dir,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    // Load configuration once at startup
    let ctx = AppContext::open(home_dir);
    logging::setup_logger(cli.verbose, ctx.store().get().settings.verbose);

    if ctx.store().outcome() == ConfigLoadOutcome::DefaultedCorrupt {
        warn!(
            "Could not parse {}, using default settings",
            ctx.store().path().display()
        );
    }
    if let Err(e) = home::ensure_bin_directories(ctx.home()) {
        warn!("Could not create tool directories: {e}");
    }

    let started = Instant::now();
    let result: Result<()> = (|| {
        cli.convert_options().validate()?;
        if cli.platform {
            StatusCommand::new(&ctx).show_platform()?;
        }
        if cli.tools {
            StatusCommand::new(&ctx).show_tools()?;
        }
        if cli.config {
            StatusCommand::new(&ctx).show_config()?;
        }
        if cli.setup {
            SetupCommand::new(&ctx).execute(cli.download)?;
        }
        if let Some(file) = &cli.decompress {
            CodecCommand::default().decompress(file)?;
        }
        if let Some(file) = &cli.compress {
            CodecCommand::default().compress(file)?;
        }
        if let Some(target) = &cli.process {
            let converter = ReportingConverter::new();
            ProcessCommand::new(&ctx, &converter).execute(target, &cli.convert_options())?;
        }
        Ok(())
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }

    println!("Done in {:.2} seconds.", started.elapsed().as_secs_f64());
}
