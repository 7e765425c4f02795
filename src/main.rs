//! `anvil` binary entry point: parses the CLI surface described in the
//! external-interfaces design, wires up the core engine (workspace,
//! settings defaults, plumbing), and hands off to the embedding
//! frontend. Rendering, the terminal/GUI event loop, and font loading
//! are external collaborators this crate does not implement.

use std::path::PathBuf;
use std::process::ExitCode;

use anvil_core::dump::WorkspaceDump;
use anvil_core::global_path::{self, GlobalPath};
use anvil_core::workspace::Editor;

struct Args {
    load: Option<PathBuf>,
    cd: Option<PathBuf>,
    fonts_in_pixels: bool,
    profile: bool,
    files: Vec<String>,
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args { load: None, cd: None, fonts_in_pixels: false, profile: false, files: Vec::new() };
    let mut it = raw.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--load" => {
                let path = it.next().ok_or("--load requires a DUMPFILE argument")?;
                args.load = Some(PathBuf::from(path));
            }
            "--cd" => {
                let dir = it.next().ok_or("--cd requires a DIR argument")?;
                args.cd = Some(PathBuf::from(dir));
            }
            "--fonts-in-pixels" => args.fonts_in_pixels = true,
            "--profile" => args.profile = true,
            positional => args.files.push(positional.to_string()),
        }
    }
    Ok(args)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run(args: Args) -> Result<Editor, String> {
    if let Some(dir) = &args.cd {
        std::env::set_current_dir(dir).map_err(|e| format!("--cd {}: {e}", dir.display()))?;
    }

    let local_is_windows = cfg!(windows);
    let mut editor = Editor::new(20.0, 1000.0);
    let column = editor.add_column();

    for file in &args.files {
        let path: GlobalPath = global_path::parse(file, local_is_windows);
        let body = anvil_core::editable::EditableModel::new(anvil_core::buffer::PieceTable::from_str(""));
        editor.add_window(column, path, body);
        editor.recent_files.add(file.clone());
    }

    if let Some(load_path) = &args.load {
        let contents = std::fs::read_to_string(load_path)
            .map_err(|e| format!("--load {}: {e}", load_path.display()))?;
        let dump = WorkspaceDump::from_json(&contents).map_err(|e| e.to_string())?;
        for col in &dump.columns {
            let column = editor.add_column();
            for window in &col.windows {
                let path = global_path::parse(&window.file, local_is_windows);
                let body = anvil_core::editable::EditableModel::new(anvil_core::buffer::PieceTable::from_str(""));
                editor.add_window(column, path, body);
            }
        }
    }

    if args.fonts_in_pixels || args.profile {
        tracing::info!(fonts_in_pixels = args.fonts_in_pixels, profile = args.profile, "startup flags recorded for the frontend");
    }

    Ok(editor)
}

fn main() -> ExitCode {
    init_tracing();
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("anvil: {msg}");
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(editor) => {
            tracing::info!(columns = editor.columns_sorted_by_left_x().len(), "workspace initialized");
            ExitCode::from(0)
        }
        Err(msg) => {
            eprintln!("anvil: {msg}");
            ExitCode::from(1)
        }
    }
}
