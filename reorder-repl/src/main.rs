use ariadne::Source;
use reorder_session::Session;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Runs every line of a script through a fresh session, printing command output as it comes, then
/// prints the final stack.
fn execute(input: &str) {
    let mut session = Session::new();
    for line in input.lines() {
        match session.execute(line) {
            Ok(output) if output.is_empty() => (), // intentionally print nothing
            Ok(output) => println!("{}", output),
            Err(err) => {
                err.build_report("input")
                    .eprint(("input", Source::from(line)))
                    .unwrap();
            },
        }
    }
    print_stack(&session);
}

/// Prints the stack bottom-up, labelling each entry with its distance from the top (the argument
/// `$n` takes). The sentinel at slot 0 stays hidden.
fn print_stack(session: &Session) {
    let depth = session.stack().len();
    for (i, expr) in session.stack().iter().enumerate().skip(1) {
        println!("[{:3}]  {}", depth - i, expr);
    }
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run script file
        let mut file = BufReader::new(File::open(filename).unwrap());
        let mut input = String::new();
        file.read_to_string(&mut input).unwrap();

        execute(&input);
    } else if !io::stdin().is_terminal() {
        // read script from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).unwrap();

        execute(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new().unwrap();
        let mut session = Session::new();

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<bool, ReadlineError> {
            let input = rl.readline(": ")?;
            let input = input.trim();
            if input.is_empty() {
                return Ok(true);
            }
            if input == "/q" {
                return Ok(false);
            }

            rl.add_history_entry(input)?;

            match session.execute(input) {
                Ok(output) if output.is_empty() => (),
                Ok(output) => println!("{}", output),
                Err(err) => {
                    err.build_report("input")
                        .eprint(("input", Source::from(input)))
                        .unwrap();
                },
            }

            println!();
            print_stack(session);
            Ok(true)
        }

        println!();
        print_stack(&session);
        loop {
            match process_line(&mut rl, &mut session) {
                Ok(true) => (),
                Ok(false) => break,
                Err(err) => {
                    match err {
                        ReadlineError::Eof | ReadlineError::Interrupted => (),
                        err => eprintln!("{}", err),
                    }
                    break;
                },
            }
        }
    }
}
