use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for quadtex")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test, render)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only doc tests
        #[arg(long)]
        doc: bool,
        /// Run only geometry module tests
        #[arg(long)]
        geometry: bool,
        /// Run only fill module tests
        #[arg(long)]
        fill: bool,
        /// Run only surface module tests
        #[arg(long)]
        surface: bool,
        /// Run only config module tests
        #[arg(long)]
        config: bool,
    },
    /// Run benchmarks
    Bench,
    /// Render a demo image with the quadtex binary
    Render {
        /// Output PNG path
        #[arg(default_value = "target/quadtex-demo.png")]
        output: String,
        /// Mapping method (bilinear or perspective)
        #[arg(short = 'm', long, default_value = "perspective")]
        method: String,
        /// Grid cells per quad side
        #[arg(short = 'n', long, default_value = "16")]
        tiles: u32,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            geometry,
            fill,
            surface,
            config,
        } => run_test(doc, geometry, fill, surface, config),
        Commands::Bench => run_bench(),
        Commands::Render {
            output,
            method,
            tiles,
            release,
        } => run_render(&output, &method, tiles, release),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(false, false, false, false, false), verbose)?;
    run_task(
        "Render (bilinear)",
        || run_render("target/quadtex-ci.png", "bilinear", 10, false),
        verbose,
    )?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--workspace").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(
    doc: bool,
    geometry: bool,
    fill: bool,
    surface: bool,
    config: bool,
) -> Result<()> {
    if doc {
        // Run doc tests
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--doc");
        return execute_command(&mut cmd);
    }

    // Determine which module tests to run
    let module_flags = [geometry, fill, surface, config];
    let module_count = module_flags.iter().filter(|&&f| f).count();

    if module_count == 0 {
        // Unit, integration and doc tests for the whole workspace
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--workspace");
        return execute_command(&mut cmd);
    }

    // Run each module's tests sequentially
    let modules = [
        (geometry, "core::geometry", "Geometry"),
        (fill, "core::fill", "Fill"),
        (surface, "core::surface", "Surface"),
        (config, "core::config", "Config"),
    ];

    let mut all_success = true;

    for (enabled, module_path, module_name) in modules {
        if !enabled {
            continue;
        }

        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--lib").arg(module_path);

        match execute_command(&mut cmd) {
            Ok(_) => {
                println!("{} {} tests passed\n", "✓".green(), module_name);
            }
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                all_success = false;
                if module_count == 1 {
                    // If only one module was requested, return the error immediately
                    return Err(e);
                }
            }
        }
    }

    if all_success {
        Ok(())
    } else {
        anyhow::bail!("Some module tests failed")
    }
}

fn run_bench() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench");

    execute_command(&mut cmd)
}

fn run_render(output: &str, method: &str, tiles: u32, release: bool) -> Result<()> {
    use std::fs;
    use std::path::Path;

    println!("{}", "=== Render Demo ===".bold().blue());

    if !matches!(method, "bilinear" | "perspective") {
        println!(
            "{} Unknown method: {} (expected bilinear or perspective)",
            "✗".red().bold(),
            method.yellow()
        );
        anyhow::bail!("Unknown fill method");
    }

    println!("{} Method: {}", "→".blue(), method.cyan());
    println!("{} Tiles: {}", "→".blue(), tiles.to_string().bold());
    println!(
        "{} Build mode: {}",
        "→".blue(),
        if release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    println!();

    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("run").arg("--bin").arg("quadtex");

    if release {
        cmd.arg("--release");
    }

    cmd.arg("--")
        .arg("--method")
        .arg(method)
        .arg("--tiles")
        .arg(tiles.to_string())
        .arg("--output")
        .arg(output);

    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        println!("\n{} Render failed", "✗".red().bold());
        anyhow::bail!("Render failed with exit code: {}", status);
    }

    let size = fs::metadata(output)?.len();
    let elapsed = start.elapsed();
    println!(
        "\n{} Wrote {} ({} bytes) in {}",
        "✓".green().bold(),
        output.cyan(),
        size,
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
