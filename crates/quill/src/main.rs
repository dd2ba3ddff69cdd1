use clap::Parser;

use quill::{Interpreter, Output, QuillError, Value};

#[derive(Parser)]
#[command(name = "quill", about = "A batch interpreter for a small Lisp-like language", version)]
struct Cli {
    /// Source file to execute
    file: Option<String>,

    /// Evaluate an expression instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Colour PRINT output and the error banner
    #[arg(short, long)]
    color: bool,

    /// Parse the source and display the tree without executing
    #[arg(long)]
    ast: bool,
}

fn main() {
    let cli = Cli::parse();
    let source = read_source(&cli);

    if cli.ast {
        run_ast(&source);
        return;
    }

    let mut interp = Interpreter::with_output(Output::stdout(cli.color));
    if let Err(e) = interp.run(&source) {
        fatal(&e, cli.color);
    }
}

fn read_source(cli: &Cli) -> String {
    if let Some(expr) = &cli.eval {
        return expr.clone();
    }
    let Some(file) = &cli.file else {
        eprintln!("Error: provide a source file or --eval expression");
        std::process::exit(2);
    };
    match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {file}: {e}");
            std::process::exit(1);
        }
    }
}

fn fatal(e: &QuillError, color: bool) -> ! {
    if color {
        eprintln!("\x1b[31mFATAL ERROR\x1b[0m");
    } else {
        eprintln!("FATAL ERROR");
    }
    eprintln!("\t{e}");
    std::process::exit(1);
}

fn run_ast(source: &str) {
    match quill::parse(source) {
        Ok(statements) => {
            for (i, statement) in statements.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_ast(statement, 0);
            }
        }
        Err(e) => {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_ast(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Atom(atom) => {
            let quote = if atom.quoted { "'" } else { "" };
            println!("{pad}Atom {quote}{}", atom.text());
        }
        Value::List(list) => {
            let quote = if list.quoted { " '" } else { "" };
            println!("{pad}List{quote}");
            for item in list.items.iter() {
                print_ast(item, indent + 1);
            }
        }
        other => println!("{pad}{}", other.type_name()),
    }
}
