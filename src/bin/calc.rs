use std::io::{stdin, Read};
use std::process;

use clap::Parser;

use kombi::polish;
use kombi::Report;

/// Polish-notation expression calculator, e.g. `calc "(+ 10 (/ 40 20))"`.
#[derive(Debug, Parser)]
#[command(name = "calc", version, about = "Polish-notation expression calculator")]
struct Args {
    /// Expression to evaluate; reads stdin when omitted or "-".
    expr: Option<String>,
    /// Print the final parse state as JSON instead of evaluating.
    #[arg(long)]
    ast: bool,
}

fn main() {
    let args = Args::parse();
    let source = match args.expr.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            if let Err(e) = stdin().read_to_string(&mut buf) {
                eprintln!("reading stdin: {e}");
                process::exit(1);
            }
            buf
        }
        Some(expr) => expr.to_string(),
    };
    let source = source.trim();

    if args.ast {
        println!("{}", Report::capture(polish::expression, source));
        return;
    }

    match polish::parse(source) {
        Ok(expr) => match polish::eval(&expr) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                eprintln!("evaluation failed: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("parse failed: {e}");
            process::exit(1);
        }
    }
}
