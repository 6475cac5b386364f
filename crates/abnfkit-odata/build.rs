//! Turns every grammar corpus file in `src/corpus/` into a test.
//!
//! Each file becomes one `#[test]` that embeds the file with `include_str!`
//! and checks all of its cases, so a failing test names the corpus file and
//! the assertion message names the case.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn main() -> io::Result<()> {
    let corpus_dir = Path::new(&env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default())
        .join("src")
        .join("corpus");
    println!("cargo::rerun-if-changed={}", corpus_dir.display());

    let mut files = corpus_files(&corpus_dir)?;
    files.sort();

    let mut code = String::from("mod corpus {\n    use super::corpus_test;\n");
    for path in &files {
        println!("cargo::rerun-if-changed={}", path.display());
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        code.push_str(&format!(
            "\n    #[test]\n    fn {test}() {{\n        corpus_test({stem:?}, include_str!({path:?}));\n    }}\n",
            test = test_name(stem),
            path = path.display().to_string(),
        ));
    }
    code.push_str("}\n");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap_or_default());
    fs::write(out_dir.join("corpus_tests.rs"), code)
}

fn corpus_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    Ok(files)
}

/// `date-time.toml` becomes `date_time`.
fn test_name(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
