//! # Glass CLI
//!
//! Loads a JSON design input, runs the engine and prints a report.
//!
//! ```text
//! glass_cli design.json          # formatted report
//! glass_cli design.json --json   # DesignReport as JSON
//! glass_cli design.json -v       # debug logging (or set RUST_LOG)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glass_core::calculations::EquivalentThicknessMethod;
use glass_core::{analyze, load_design_input, CalcError, DesignReport};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "glass_cli")]
#[command(version, about = "Laminated and insulated glass design calculator")]
struct Cli {
    /// Design input file (JSON)
    input: PathBuf,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CalcError> {
    let input = load_design_input(&cli.input)?;
    let report = analyze(&input)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn method_name(method: &EquivalentThicknessMethod) -> String {
    match method {
        EquivalentThicknessMethod::ShearTransferCoef { span, beta } => {
            format!("{} (a = {:.0} mm, beta = {})", method.display_name(), span.0, beta)
        }
        _ => method.display_name().to_string(),
    }
}

fn print_report(report: &DesignReport) {
    let panel = &report.panel;
    let result = &report.result;

    println!("═══════════════════════════════════════");
    println!("  GLASS PANEL: {}", if report.label.is_empty() { "(unnamed)" } else { report.label.as_str() });
    println!("═══════════════════════════════════════");
    println!();
    println!("Panel:");
    println!("  Size:     {:.0} x {:.0} mm", panel.dim_x.0, panel.dim_y.0);
    println!("  Pressure: {:.3} kPa", panel.pressure.0 * 1000.0);
    if let Some(buildup) = panel.buildups.first() {
        println!("  Method:   {}", method_name(&buildup.method));
    }
    println!(
        "  Roark:    a/b = {:.3}, beta = {:.4}, alpha = {:.4}, gamma = {:.3}",
        result.coefficients.aspect_ratio,
        result.coefficients.beta,
        result.coefficients.alpha,
        result.coefficients.gamma,
    );

    for (i, (buildup, demand)) in panel.buildups.iter().zip(&result.buildups).enumerate() {
        let label = report
            .buildup_labels
            .get(i)
            .filter(|label| !label.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Buildup {}", i + 1));

        println!();
        println!("{}:", label);
        println!("  h_efw:         {:.3} mm", buildup.h_efw.0);
        if let Some(gamma) = buildup.shear_transfer_coef {
            println!("  Shear coef:    {:.4}", gamma);
        }
        println!("  Load share:    {:.4}", demand.lsf);
        println!("  Pressure:      {:.3} kPa", demand.pressure.0 * 1000.0);
        println!("  Deflection:    {:.2} mm", demand.deflection.0);
        println!("  Edge reaction: {:.3} N/mm", demand.edge_reaction.0);

        let allowable = report.allowable.get(i);
        for (j, (ply, stress)) in buildup.plies.iter().zip(&demand.ply_stresses).enumerate() {
            match allowable.and_then(|plies| plies.get(j)) {
                Some(limit) => {
                    let unity = stress.0 / limit.allowable_stress.0;
                    println!(
                        "  Ply {} ({:.2} mm {}): {:.2} / {:.2} MPa = {:.2} {}",
                        j + 1,
                        ply.t_min().0,
                        ply.glass_type(),
                        stress.0,
                        limit.allowable_stress.0,
                        unity,
                        status_icon(unity <= 1.0)
                    );
                }
                None => println!(
                    "  Ply {} ({:.2} mm {}): {:.2} MPa",
                    j + 1,
                    ply.t_min().0,
                    ply.glass_type(),
                    stress.0
                ),
            }
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  MAX STRESS: {:.2} MPa   MAX DEFLECTION: {:.2} mm",
        result.max_stress().0,
        result.max_deflection().0
    );
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
