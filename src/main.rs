use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use molsasa::input::{self, ParseOptions, ParsedStructure};
use molsasa::{Algorithm, ClassTotals, SasaParams, classify::Classifier, compute};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    /// Lee-Richards slice integration
    LeeRichards,
    /// Shrake-Rupley point sampling
    ShrakeRupley,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(a: CliAlgorithm) -> Self {
        match a {
            CliAlgorithm::LeeRichards => Self::LeeRichards,
            CliAlgorithm::ShrakeRupley => Self::ShrakeRupley,
        }
    }
}

/// JSON output document.
#[derive(Serialize)]
struct JsonOutput {
    n_atoms: usize,
    algorithm: String,
    probe_radius: f64,
    total: f64,
    #[serde(flatten)]
    classes: ClassTotals,
    areas: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    residues: Option<Vec<ResidueArea>>,
}

#[derive(Serialize)]
struct ResidueArea {
    chain: String,
    res_seq: i32,
    res_name: String,
    area: f64,
}

#[derive(Parser)]
#[command(name = "molsasa")]
#[command(about = "Compute solvent accessible surface area of atomic structures")]
#[command(
    long_about = "Computes per-atom solvent accessible surface area (SASA) with the \
    Lee-Richards or Shrake-Rupley algorithm.\n\n\
    Input formats: PDB, mmCIF, or .xyzr (whitespace-separated, last 4 columns \
    are x y z radius). The format is detected from the file extension, then \
    from content."
)]
struct Cli {
    /// Input structure file. Reads from stdin if not specified
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file. Writes to stdout if not specified
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Integration algorithm
    #[arg(short, long, value_enum, default_value_t = CliAlgorithm::LeeRichards)]
    algorithm: CliAlgorithm,

    /// Rolling probe radius in Ångström
    #[arg(long, default_value_t = 1.4)]
    probe: f64,

    /// Shrake-Rupley test points per atom
    #[arg(long, default_value_t = 100)]
    sr_points: u32,

    /// Lee-Richards slice thickness in Ångström
    #[arg(long, default_value_t = 0.25)]
    lr_delta: f64,

    /// Worker threads
    #[arg(short = 't', long, default_value_t = 1)]
    threads: u32,

    /// Include hydrogen atoms
    #[arg(long)]
    hydrogens: bool,

    /// Exclude HETATM records
    #[arg(long)]
    no_hetatm: bool,

    /// Custom classifier rules file (resName atomName radius [class] per line)
    #[arg(long)]
    radii: Option<PathBuf>,

    /// Add a per-residue area table to the output
    #[arg(long)]
    per_residue: bool,

    /// Suppress log messages
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut classifier = Classifier::new();
    if let Some(path) = &cli.radii {
        let text = std::fs::read_to_string(path)?;
        classifier
            .load_from_text(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    }

    let options = ParseOptions {
        exclude_heteroatoms: cli.no_hetatm,
        include_hydrogens: cli.hydrogens,
        as_assembly: false,
    };

    let structure: ParsedStructure = match &cli.input {
        Some(path) => input::parse_file(path, &options, &classifier)?,
        None => input::parse_stdin(&options, &classifier)?,
    };

    if !cli.quiet {
        eprintln!("Read {} atoms", structure.atoms.len());
    }

    let params = SasaParams {
        probe_radius: cli.probe,
        sr_points: cli.sr_points,
        lr_delta: cli.lr_delta,
        n_threads: cli.threads,
    };

    let result = compute(&structure.atoms, Algorithm::from(cli.algorithm), &params)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    if !cli.quiet {
        eprintln!("Total SASA: {:.3} Å²", result.total());
    }

    let residues = if cli.per_residue && !structure.records.is_empty() {
        let groups = input::build_residue_grouping(&structure.records);
        let totals = result.group_totals(&groups);
        let mut rows: Vec<ResidueArea> = Vec::with_capacity(totals.len());
        for (record, &g) in structure.records.iter().zip(&groups) {
            if g as usize == rows.len() {
                rows.push(ResidueArea {
                    chain: record.chain_id.clone(),
                    res_seq: record.res_seq,
                    res_name: record.res_name.clone(),
                    area: totals[g as usize],
                });
            }
        }
        Some(rows)
    } else {
        None
    };

    let output = JsonOutput {
        n_atoms: result.len(),
        algorithm: format!("{:?}", Algorithm::from(cli.algorithm)),
        probe_radius: cli.probe,
        total: result.total(),
        classes: result.class_totals(&structure.classes),
        areas: result.areas().to_vec(),
        residues,
    };

    if let Some(path) = &cli.output {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &output)?;
    } else {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("molsasa: {e}");
            ExitCode::FAILURE
        }
    }
}
