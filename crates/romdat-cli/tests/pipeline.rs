//! End-to-end pipeline tests over temporary files.

use romdat_cli::pipeline::{
    ConvertOptions, OutputConfig, convert_catalogue, read_catalogue, write_outputs,
};
use romdat_model::Config;

const KEY_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const KEY_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const KEY_C: &str = "cccccccccccccccccccccccccccccccc";

fn sample_catalogue() -> String {
    format!(
        "; test catalogue\n\
         [{KEY_A}]\n\
         GoodName=Example Game (U) [!]\n\
         CRC=00000002 00000001\n\
         SaveType=Flash ram\n\
         Cheat0=D109911A 0000\n\
         \n\
         [{KEY_B}]\n\
         GoodName=Example Game (U) [o1]\n\
         CRC=00000002 00000001\n\
         RefMD5={KEY_A}\n\
         \n\
         [{KEY_C}]\n\
         GoodName=Example Game (E)\n\
         CRC=00000004 00000003\n\
         RefMD5={KEY_A}\n"
    )
}

#[test]
fn convert_produces_expected_stats() {
    let outcome = convert_catalogue(&sample_catalogue(), &ConvertOptions::default()).unwrap();
    assert_eq!(outcome.stats.parsed, 3);
    assert_eq!(outcome.stats.duplicates_collapsed, 1);
    assert_eq!(outcome.stats.default_elided, 1);
    assert_eq!(outcome.stats.dropped_unresolved, 0);
    assert_eq!(outcome.stats.final_entries, 2);
    assert_eq!(outcome.stats.string_slots, 1);

    assert!(matches!(outcome.entries[1].config, Config::Reference { target: 0 }));
}

#[test]
fn strict_mode_rejects_unknown_keys() {
    let text = format!("[{KEY_A}]\nCRC=00000001 00000002\nMystery=1\n");
    assert!(convert_catalogue(&text, &ConvertOptions::default()).is_ok());
    assert!(convert_catalogue(&text, &ConvertOptions { strict: true }).is_err());
}

#[test]
fn write_outputs_creates_the_expected_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalogue_path = dir.path().join("mupen64plus.ini");
    std::fs::write(&catalogue_path, sample_catalogue()).unwrap();

    let text = read_catalogue(&catalogue_path).unwrap();
    let outcome = convert_catalogue(&text, &ConvertOptions::default()).unwrap();
    let out_dir = dir.path().join("out");
    let written = write_outputs(
        &outcome,
        &OutputConfig {
            out_dir: out_dir.clone(),
            filtered_catalogue: true,
        },
    )
    .unwrap();

    assert_eq!(written.len(), 3);
    let records = std::fs::read(out_dir.join("rom_records.dat")).unwrap();
    assert_eq!(records.len(), outcome.entries.len() * 12);
    let strings = std::fs::read_to_string(out_dir.join("cheat_strings.txt")).unwrap();
    assert!(strings.contains("D109911A 0000"));
    let filtered = std::fs::read_to_string(out_dir.join("filtered.ini")).unwrap();
    assert!(filtered.contains(&format!("[{KEY_A}]")));
    assert!(!filtered.contains(&format!("[{KEY_B}]")));
}

#[test]
fn missing_catalogue_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_catalogue(&dir.path().join("missing.ini")).is_err());
}
