//! Build automation tasks for the mux-clock project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the mux-clock project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, firmware for every board, docs
    CheckAll,
    /// Build the firmware for one board
    Build {
        #[arg(long, default_value = "pico1")]
        board: Board,
        #[arg(long)]
        release: bool,
    },
    /// Build UF2 firmware file for flashing to Pico
    Uf2 {
        #[arg(long, default_value = "pico1")]
        board: Board,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Board {
    Pico1,
    Pico2,
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Board::Pico1 => write!(f, "pico1"),
            Board::Pico2 => write!(f, "pico2"),
        }
    }
}

impl Board {
    const ALL: [Board; 2] = [Board::Pico1, Board::Pico2];

    fn target(self) -> &'static str {
        match self {
            Board::Pico1 => "thumbv6m-none-eabi",
            Board::Pico2 => "thumbv8m.main-none-eabihf",
        }
    }

    fn features(self) -> String {
        format!("{self},arm")
    }
}

const BINARY: &str = "mux-clock";

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build { board, release } => {
            if build_firmware(board, release) {
                println!("{}", "Build successful! ✨".green());
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Uf2 { board } => build_uf2(board),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    // Unit, integration and doc tests all run on the host with default features.
    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--package", BINARY]);
    if let Some(target) = &host_target {
        test_cmd.arg("--target").arg(target);
    }
    if !run_command(&mut test_cmd) {
        return ExitCode::FAILURE;
    }

    for board in Board::ALL {
        println!(
            "\n{}",
            format!("==> Building firmware ({board}, arm)...").cyan()
        );
        if !build_firmware(board, false) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    let board = Board::Pico2;
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--package",
        BINARY,
        "--target",
        board.target(),
        "--no-deps",
        "--features",
        &board.features(),
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    ExitCode::SUCCESS
}

fn build_firmware(board: Board, release: bool) -> bool {
    let workspace_root = workspace_root();
    let target = board.target();
    let features = board.features();
    println!(
        "{}",
        format!("Building firmware with features: {features}").cyan()
    );

    let mut cmd = Command::new("cargo");
    cmd.current_dir(&workspace_root).args([
        "build",
        "--bin",
        BINARY,
        "--target",
        target,
        "--features",
        &features,
    ]);
    if release {
        cmd.arg("--release");
    }
    run_command(&mut cmd)
}

fn build_uf2(board: Board) -> ExitCode {
    let workspace_root = workspace_root();
    let target = board.target();

    println!(
        "{}",
        format!("Building UF2 for '{BINARY}' ({board})").cyan()
    );
    println!("  Features: {}", board.features().bright_black());
    println!("  Target: {}", target.bright_black());

    // Build in release mode for UF2
    if !build_firmware(board, true) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{target}/release/{BINARY}");
    let uf2_path = format!("{BINARY}-{board}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    // `cargo xtask` runs from the workspace root
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
