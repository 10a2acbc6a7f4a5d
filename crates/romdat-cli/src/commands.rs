use anyhow::Result;
use comfy_table::Table;
use tracing::info;

use romdat_cli::pipeline::{ConvertOptions, OutputConfig, convert_catalogue, read_catalogue, write_outputs};
use romdat_cli::types::ConvertResult;

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;

/// Catalogue keys the parser recognizes, with their effects.
const CATALOGUE_KEYS: [(&str, &str); 14] = [
    ("CRC", "Content checksum; two 8-hex-digit fields, resets config defaults"),
    ("RefMD5", "Declares this section a reference to another section"),
    ("SaveType", "Save hardware (Eeprom 4kb/16kb, Sram, Flash ram, Controller pack, None)"),
    ("Status", "Emulation status, 0-5"),
    ("Players", "Supported player count, 0-7"),
    ("Rumble", "Rumble pak support, Y/N"),
    ("Transferpak", "Transfer pak support, Y/N"),
    ("Mempak", "Controller pak support, Y/N"),
    ("Biopak", "Bio sensor support, Y/N"),
    ("CountPerOp", "Count per operation, 1-4"),
    ("DisableExtraMem", "Disable expansion pak memory, 1/0"),
    ("SiDmaDuration", "SI DMA duration override, must be 1 when present"),
    ("Cheat0", "Cheat code string, deduplicated into the string table"),
    ("GoodName", "Display name, truncated to 63 bytes"),
];

pub fn run_keys() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Effect"]);
    apply_table_style(&mut table);
    for (key, effect) in CATALOGUE_KEYS {
        table.add_row(vec![key, effect]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let text = read_catalogue(&args.catalogue)?;
    let options = ConvertOptions {
        strict: args.strict,
    };
    let outcome = convert_catalogue(&text, &options)?;

    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        args.catalogue
            .parent()
            .map(|parent| parent.join("out"))
            .unwrap_or_else(|| "out".into())
    });

    let written = if args.dry_run {
        info!("dry run, skipping output files");
        Vec::new()
    } else {
        write_outputs(
            &outcome,
            &OutputConfig {
                out_dir: out_dir.clone(),
                filtered_catalogue: args.filtered_ini,
            },
        )?
    };

    let result = ConvertResult {
        catalogue: args.catalogue.clone(),
        out_dir,
        written,
        stats: outcome.stats,
    };

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "wrote run report");
    }
    Ok(result)
}
