use std::{env, fs::read_to_string, path::Path, process, rc::Rc, time::Instant};

use ezc::{
    compiler::compiler::{Compiler, Program},
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    CompileOptions,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.ez>", args.first().map_or("ezc", String::as_str));
        process::exit(2);
    }

    let file_path = &args[1];
    let file_name = Path::new(file_path)
        .file_name()
        .map_or_else(|| file_path.clone(), |name| name.to_string_lossy().into_owned());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(1);
        }
    };

    let options = CompileOptions {
        file_name,
        ..CompileOptions::default()
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(options.file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &source);
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let compiler = Compiler::with_layout(options.layout);
    let program = match parse(tokens, Rc::new(options.file_name), compiler) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &source);
            process::exit(1);
        }
    };

    println!("Parsed and generated quadruples in {:?}", parse_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    print_program(&program);
}

fn print_program(program: &Program) {
    println!();
    for (index, quadruple) in program.quadruples.iter().enumerate() {
        println!("{:>4}: {}", index, quadruple);
    }

    println!();
    for function in &program.functions {
        let params: Vec<String> = function
            .params
            .iter()
            .zip(&function.param_addresses)
            .map(|(ty, address)| format!("{} at {}", ty, address))
            .collect();
        println!(
            "{} {}({}) start @{}, {} locals, {} temporaries",
            function.return_type,
            function.name,
            params.join(", "),
            function.start,
            function.frame.locals,
            function.frame.temporaries
        );
    }

    println!();
    for literal in program.literals.entries() {
        println!("{:>6} {} {:?}", literal.address, literal.ty, literal.text);
    }
}
