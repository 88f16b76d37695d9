use log::debug;
use thiserror::Error;

use crate::converter::{self, ConvertError};
use crate::editor::InputBuffer;
use crate::evaluator::{self, EvalError};
use crate::lexer;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Evaluates a single expression, continuing from `previous` when the
/// expression opens with an operator.
///
/// ```
/// assert_eq!(deskcalc::eval("3+5*2", 0.0), Ok(13.0));
/// assert_eq!(deskcalc::eval("+2", 5.0), Ok(7.0));
/// ```
pub fn eval(expr: &str, previous: f64) -> Result<f64, CalcError> {
    let lexemes = lexer::tokenize(expr);
    let postfix = converter::convert(&lexemes, previous)?;
    Ok(evaluator::evaluate(&postfix)?)
}

type Subscriber = Box<dyn FnMut(&str)>;

/// The calculator facade: owns the current result and the pending input
/// text, and reports every outcome through its notification channels.
///
/// Subscribers run synchronously, in registration order, before the
/// triggering operation returns. Within one operation the input (buffer
/// mutation) notification fires first, then result, then error.
///
/// Delete-style input notifications are length-encoded: the payload is a
/// run of spaces sized to the removed span. An empty payload signals a
/// rejected keystroke.
#[derive(Default)]
pub struct Calculator {
    result: f64,
    buffer: InputBuffer,
    result_subscribers: Vec<Subscriber>,
    error_subscribers: Vec<Subscriber>,
    input_subscribers: Vec<Subscriber>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to stringified results of successful evaluations and
    /// resets.
    pub fn on_result_updated(&mut self, subscriber: impl FnMut(&str) + 'static) {
        self.result_subscribers.push(Box::new(subscriber));
    }

    /// Subscribe to error messages; a blank payload means "clear the
    /// error display".
    pub fn on_error_updated(&mut self, subscriber: impl FnMut(&str) + 'static) {
        self.error_subscribers.push(Box::new(subscriber));
    }

    /// Subscribe to input deltas: appended text, length-encoded erase
    /// signals, or an empty payload for a rejected keystroke.
    pub fn on_input_updated(&mut self, subscriber: impl FnMut(&str) + 'static) {
        self.input_subscribers.push(Box::new(subscriber));
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    /// The not-yet-evaluated expression text.
    pub fn input(&self) -> &str {
        self.buffer.as_str()
    }

    /// Appends `text` to the pending input. Invalid characters leave the
    /// buffer untouched and signal the rejection with an empty payload.
    pub fn append_input(&mut self, text: &str) {
        if self.buffer.append(text) {
            self.notify_input(text);
        } else {
            self.notify_input("");
        }
    }

    /// Removes the final input character; silently does nothing when
    /// there is no input.
    pub fn remove_last_char(&mut self) {
        if let Some(removed) = self.buffer.remove_last_char() {
            self.notify_input(&" ".repeat(removed));
        }
    }

    /// Removes the last entered number and its adjoining operators. On an
    /// empty buffer this resets the current result instead.
    pub fn clear_last_number(&mut self) {
        match self.buffer.clear_last_number() {
            Some(removed) => self.notify_input(&" ".repeat(removed)),
            None => {
                self.notify_input("");
                self.update_result(0.0);
            }
        }
    }

    /// Empties the input, resets the result to zero, and clears the error
    /// display.
    pub fn clear_all(&mut self) {
        let discarded = self.buffer.clear();
        self.notify_input(&" ".repeat(discarded));
        self.update_result(0.0);
        self.notify_error(" ");
    }

    /// Drains the pending input and evaluates it. The buffer is emptied
    /// whether or not evaluation succeeds; an empty buffer behaves like
    /// [`Calculator::clear_all`].
    pub fn evaluate(&mut self) {
        let expr = self.buffer.take();
        self.notify_input(&" ".repeat(expr.len()));

        if expr.is_empty() {
            self.clear_all();
            return;
        }

        self.notify_error(" ");
        debug!("evaluating {expr:?}");
        match eval(&expr, self.result) {
            Ok(value) => self.update_result(value),
            Err(error) => {
                debug!("evaluation failed: {error}");
                self.notify_error(&error.to_string());
            }
        }
    }

    fn update_result(&mut self, value: f64) {
        self.result = value;
        self.notify_result(&value.to_string());
    }

    fn notify_result(&mut self, payload: &str) {
        for subscriber in &mut self.result_subscribers {
            subscriber(payload);
        }
    }

    fn notify_error(&mut self, payload: &str) {
        for subscriber in &mut self.error_subscribers {
            subscriber(payload);
        }
    }

    fn notify_input(&mut self, payload: &str) {
        for subscriber in &mut self.input_subscribers {
            subscriber(payload);
        }
    }
}
