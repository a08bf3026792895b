use arbor_core::{Cursor, OutputOpts, TreeEditor};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    about = "Navigate and edit JSON documents with slash paths (., .., *, **)",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the value at a simple path
    Get(ReadArgs),
    /// List children at a simple path
    List(ReadArgs),
    /// Print every simple path matching a wildcard path
    Expand(ReadArgs),
    /// Write a value (raw JSON) at a path
    Set(SetArgs),
    /// Add a named child under a path
    Add(AddArgs),
    /// Remove a named child under a path
    Remove(RemoveArgs),
    /// Copy the value at one path to another
    Copy(CopyArgs),
    /// Create a path of empty mappings if it does not exist
    Mkpath(MkpathArgs),
}

#[derive(ClapArgs, Debug)]
struct Source {
    /// JSON file to load
    file: PathBuf,
    /// Start position for relative paths, e.g. a/b
    #[arg(long)]
    at: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct Output {
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long, conflicts_with = "in_place")]
    out: Option<PathBuf>,
    /// Rewrite the input file (a timestamped .bak copy is kept)
    #[arg(long, default_value_t = false)]
    in_place: bool,
    /// Emit compact JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(ClapArgs, Debug)]
struct ReadArgs {
    #[command(flatten)]
    src: Source,
    /// Path, e.g. a/b/0 or **/name for expand
    path: String,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    #[command(flatten)]
    src: Source,
    path: String,
    /// New value as raw JSON (e.g., 123, true, "str", {"a":1})
    #[arg(long)]
    value: String,
    /// Fail instead of creating missing intermediate nodes
    #[arg(long, default_value_t = false)]
    no_create: bool,
    #[command(flatten)]
    out: Output,
}

#[derive(ClapArgs, Debug)]
struct AddArgs {
    #[command(flatten)]
    src: Source,
    path: String,
    /// Child name to add
    name: String,
    /// Child value as raw JSON; null when omitted
    #[arg(long)]
    value: Option<String>,
    #[arg(long, default_value_t = false)]
    no_create: bool,
    #[command(flatten)]
    out: Output,
}

#[derive(ClapArgs, Debug)]
struct RemoveArgs {
    #[command(flatten)]
    src: Source,
    path: String,
    /// Child name to remove
    name: String,
    #[command(flatten)]
    out: Output,
}

#[derive(ClapArgs, Debug)]
struct CopyArgs {
    #[command(flatten)]
    src: Source,
    from: String,
    to: String,
    #[arg(long, default_value_t = false)]
    no_create: bool,
    #[command(flatten)]
    out: Output,
}

#[derive(ClapArgs, Debug)]
struct MkpathArgs {
    #[command(flatten)]
    src: Source,
    path: String,
    #[command(flatten)]
    out: Output,
}

fn main() {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arbor=warn,arbor_core=warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Get(a) => cmd_get(a),
        Cmd::List(a) => cmd_list(a),
        Cmd::Expand(a) => cmd_expand(a),
        Cmd::Set(a) => cmd_set(a),
        Cmd::Add(a) => cmd_add(a),
        Cmd::Remove(a) => cmd_remove(a),
        Cmd::Copy(a) => cmd_copy(a),
        Cmd::Mkpath(a) => cmd_mkpath(a),
    }
}

fn fail(code: i32, msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(code);
}

fn open(src: &Source) -> TreeEditor {
    let root = arbor_core::load_tree(&src.file).unwrap_or_else(|e| fail(2, e));
    let mut cursor = Cursor::new(root).unwrap_or_else(|e| fail(2, e));
    if let Some(at) = &src.at
        && let Err(e) = cursor.follow_simple_path(at)
    {
        fail(3, e);
    }
    TreeEditor::new(cursor)
}

fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|e| fail(3, format!("invalid --value JSON: {}", e)))
}

fn finish(ed: &TreeEditor, file: &Path, out: &Output) {
    let opts = OutputOpts { pretty: !out.compact };
    let root = ed.cursor().root_value();
    let target = if out.in_place {
        arbor_core::backup_file(file).unwrap_or_else(|e| fail(5, e));
        Some(file)
    } else {
        out.out.as_deref()
    };
    match target {
        Some(path) => arbor_core::save_tree(path, &root, opts).unwrap_or_else(|e| fail(5, e)),
        None => println!("{}", arbor_core::render_tree(&root, opts).unwrap_or_else(|e| fail(5, e))),
    }
}

fn cmd_get(args: ReadArgs) {
    let mut ed = open(&args.src);
    match ed.read_from(&args.path) {
        Some(v) => println!("{}", serde_json::to_string_pretty(&*v).unwrap_or_else(|e| fail(5, e))),
        None => fail(3, format!("not found: {}", args.path)),
    }
}

fn cmd_list(args: ReadArgs) {
    let mut ed = open(&args.src);
    if ed.read_from(&args.path).is_none() {
        fail(3, format!("not found: {}", args.path));
    }
    for c in ed.cursor().children() {
        println!(
            "{}\t{:?}{}",
            c.name,
            c.kind,
            c.len.map(|n| format!("\t(len={})", n)).unwrap_or_default()
        );
    }
}

fn cmd_expand(args: ReadArgs) {
    let ed = open(&args.src);
    let paths = arbor_core::resolve::expand(ed.cursor(), &args.path).unwrap_or_else(|e| fail(3, e));
    for p in paths {
        println!("{}", p);
    }
}

fn cmd_set(args: SetArgs) {
    let mut ed = open(&args.src);
    let value = parse_value(&args.value);
    match ed.write_to(&args.path, value, !args.no_create) {
        Ok(true) => finish(&ed, &args.src.file, &args.out),
        Ok(false) => fail(3, format!("not found: {}", args.path)),
        Err(e) => fail(4, e),
    }
}

fn cmd_add(args: AddArgs) {
    let mut ed = open(&args.src);
    let value = args.value.as_deref().map(parse_value).unwrap_or(serde_json::Value::Null);
    match ed.add_to(&args.path, &args.name, value, !args.no_create) {
        Ok(true) => finish(&ed, &args.src.file, &args.out),
        Ok(false) => fail(3, format!("not found: {}", args.path)),
        Err(e) => fail(4, e),
    }
}

fn cmd_remove(args: RemoveArgs) {
    let mut ed = open(&args.src);
    match ed.remove_from(&args.path, &args.name) {
        Ok(true) => finish(&ed, &args.src.file, &args.out),
        Ok(false) => fail(3, format!("not found: {}", args.path)),
        Err(e) => fail(4, e),
    }
}

fn cmd_copy(args: CopyArgs) {
    let mut ed = open(&args.src);
    match ed.copy(&args.from, &args.to, !args.no_create) {
        Ok(true) => finish(&ed, &args.src.file, &args.out),
        Ok(false) => fail(3, format!("not found: {} or {}", args.from, args.to)),
        Err(e) => fail(4, e),
    }
}

fn cmd_mkpath(args: MkpathArgs) {
    let mut ed = open(&args.src);
    ed.create_path(&args.path).unwrap_or_else(|e| fail(4, e));
    finish(&ed, &args.src.file, &args.out);
}
