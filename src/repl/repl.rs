use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::process;

use encoding_rs::UTF_8;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::interpreter::Interpreter;
use crate::object::Value;

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Runs the interactive loop: one root environment lives for the whole
/// session, so a binding made on one line is visible on the next. Reads one
/// line at a time from `input`, writing the prompt, the evaluated result and
/// any parser-error banner to `output`. The literal input `exit`
/// (case-insensitive) ends the session; so does EOF on `input`.
pub fn run_prompt<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Interpreter::new_environment();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        let bytes_read = input.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(());
        }

        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        let (program, errors) = Interpreter::parse(trimmed);
        if !errors.is_empty() {
            print_parser_errors(&mut output, &errors)?;
            continue;
        }

        let value = Interpreter::eval(&program, &env);
        writeln!(output, "{}", value.inspect())?;
    }
}

fn print_parser_errors<W: Write>(output: &mut W, errors: &[String]) -> io::Result<()> {
    write!(output, "{MONKEY_FACE}")?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;
    for message in errors {
        writeln!(output, "\t{message}")?;
    }
    Ok(())
}

/// Runs a whole file as a single program: one parse, one evaluation, one
/// root environment, then the process exits. Reads through a UTF-8
/// transcoder rather than `fs::read_to_string` so a source file carrying a
/// byte-order mark is still accepted instead of tripping `read_to_string`'s
/// strict well-formed-UTF-8 check.
pub fn run_file(path: &str) -> io::Result<()> {
    let file = File::open(path)?;
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(UTF_8))
        .build(file);
    let mut source = String::new();
    decoder.read_to_string(&mut source)?;

    let (program, errors) = Interpreter::parse(&source);
    if !errors.is_empty() {
        let stdout = io::stdout();
        print_parser_errors(&mut stdout.lock(), &errors)?;
        process::exit(65);
    }

    let env = Interpreter::new_environment();
    let value = Interpreter::eval(&program, &env);
    if let Value::Error(_) = value {
        eprintln!("{}", value.inspect());
        process::exit(70);
    }
    println!("{}", value.inspect());
    Ok(())
}
