use anyhow::{bail, Error};
use std::io::BufRead;
use std::io::Write;

use deskcalc::Calculator;

/// One keystroke-level operation routed to the calculator.
enum Action {
    Append(String),
    RemoveLastChar,
    ClearLastNumber,
    ClearAll,
    Evaluate,
}

fn dispatch(calculator: &mut Calculator, action: Action) {
    match action {
        Action::Append(text) => calculator.append_input(&text),
        Action::RemoveLastChar => calculator.remove_last_char(),
        Action::ClearLastNumber => calculator.clear_last_number(),
        Action::ClearAll => calculator.clear_all(),
        Action::Evaluate => calculator.evaluate(),
    }
}

/// Maps one input line to actions. `del`, `ce` and `ac` are the
/// backspace, clear-entry and all-clear keys; a trailing `=` evaluates
/// whatever has been typed so far.
fn actions_for(line: &str) -> Vec<Action> {
    match line.trim() {
        "del" => vec![Action::RemoveLastChar],
        "ce" => vec![Action::ClearLastNumber],
        "ac" => vec![Action::ClearAll],
        "=" => vec![Action::Evaluate],
        text => match text.strip_suffix('=') {
            Some(expr) => vec![Action::Append(expr.to_owned()), Action::Evaluate],
            None => vec![Action::Append(text.to_owned())],
        },
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let mut calculator = Calculator::new();
    calculator.on_result_updated(|value| println!("= {}", value));
    calculator.on_error_updated(|message| {
        if !message.trim().is_empty() {
            println!("{}", message);
        }
    });

    let args = std::env::args_os().skip(1);

    if args.len() > 0 {
        let mut pieces = Vec::new();
        for arg in args {
            let Some(utf8_arg) = arg.to_str() else {
                bail!("Arguments contain invalid UTF-8 string");
            };
            pieces.push(utf8_arg.to_owned());
        }

        calculator.append_input(&pieces.join(" "));
        calculator.evaluate();
    } else {
        let stdin = std::io::stdin();
        let reader = std::io::BufReader::new(stdin);
        let is_interactive = atty::is(atty::Stream::Stdin);

        if is_interactive {
            prompt(&calculator)?;
        }

        for line in reader.lines() {
            for action in actions_for(&line?) {
                dispatch(&mut calculator, action);
            }
            if is_interactive {
                prompt(&calculator)?;
            }
        }
    }

    Ok(())
}

/// Shows the pending expression text behind the prompt, so typed-but-not-
/// yet-evaluated input stays visible across lines.
fn prompt(calculator: &Calculator) -> Result<(), Error> {
    let mut stdout = std::io::stdout();
    write!(stdout, ">>> {}", calculator.input())?;
    stdout.flush()?;
    Ok(())
}
