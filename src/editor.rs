/// Characters a keystroke may contribute to the expression text.
const ALPHABET: &str = " 1234567890.()Xx!*/+-";

/// States of the backward scan that finds the last entered number
/// together with its adjoining operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    NumberFound,
    NumberFinalized,
}

/// The mutable not-yet-evaluated expression text.
///
/// Editing operations report how many trailing characters changed so the
/// caller can mirror the edit on whatever display it maintains.
#[derive(Debug, Default)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends `text` if every character belongs to the input alphabet.
    /// Returns whether the buffer was mutated; rejected text leaves the
    /// buffer untouched.
    pub fn append(&mut self, text: &str) -> bool {
        if text.chars().all(|c| ALPHABET.contains(c)) {
            self.text.push_str(text);
            true
        } else {
            false
        }
    }

    /// Removes the final character. Returns the removed length, `None`
    /// when the buffer is already empty.
    pub fn remove_last_char(&mut self) -> Option<usize> {
        self.text.pop().map(|_| 1)
    }

    /// Removes the last entered number and any operators to its right,
    /// scanning backward until a digit or decimal point shows up past an
    /// already-finalized number. If the scan exhausts the buffer before
    /// that happens, the removed number was the first token and the whole
    /// buffer is cleared. Returns the removed length, `None` when the
    /// buffer is empty.
    pub fn clear_last_number(&mut self) -> Option<usize> {
        if self.text.is_empty() {
            return None;
        }

        let mut state = ScanState::Scanning;
        for (at, c) in self.text.char_indices().rev() {
            let numeric = c.is_ascii_digit() || c == '.';
            match state {
                ScanState::Scanning if numeric => state = ScanState::NumberFound,
                ScanState::NumberFound if !numeric => state = ScanState::NumberFinalized,
                ScanState::NumberFinalized if numeric => {
                    let removed = self.text.len() - (at + c.len_utf8());
                    self.text.truncate(at + c.len_utf8());
                    return Some(removed);
                }
                _ => {}
            }
        }

        Some(self.clear())
    }

    /// Empties the buffer, returning the discarded length.
    pub fn clear(&mut self) -> usize {
        let discarded = self.text.len();
        self.text.clear();
        discarded
    }

    /// Drains the buffer, handing the pending text to the caller.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> InputBuffer {
        let mut buffer = InputBuffer::default();
        assert!(buffer.append(text));
        buffer
    }

    #[test]
    fn append_accepts_the_alphabet() {
        let mut buffer = InputBuffer::default();
        assert!(buffer.append("1+2*(3.5)!x X/ -"));
        assert_eq!(buffer.as_str(), "1+2*(3.5)!x X/ -");
    }

    #[test]
    fn append_rejects_foreign_characters() {
        let mut buffer = buffer("12");
        assert!(!buffer.append("a"));
        assert!(!buffer.append("3%"));
        assert_eq!(buffer.as_str(), "12");
    }

    #[test]
    fn remove_last_char_trims_one() {
        let mut buffer = buffer("123");
        assert_eq!(buffer.remove_last_char(), Some(1));
        assert_eq!(buffer.as_str(), "12");
    }

    #[test]
    fn remove_last_char_on_empty_is_a_noop() {
        assert_eq!(InputBuffer::default().remove_last_char(), None);
    }

    #[test]
    fn clear_last_number_removes_number_and_operator() {
        let mut buffer = buffer("1+2");
        assert_eq!(buffer.clear_last_number(), Some(2));
        assert_eq!(buffer.as_str(), "1");
    }

    #[test]
    fn clear_last_number_removes_trailing_operators_too() {
        let mut buffer = buffer("1+2+");
        assert_eq!(buffer.clear_last_number(), Some(3));
        assert_eq!(buffer.as_str(), "1");
    }

    #[test]
    fn clear_last_number_keeps_multidigit_neighbor() {
        let mut buffer = buffer("12*34");
        assert_eq!(buffer.clear_last_number(), Some(3));
        assert_eq!(buffer.as_str(), "12");
    }

    #[test]
    fn first_number_clears_the_whole_buffer() {
        let mut buffer = buffer("123");
        assert_eq!(buffer.clear_last_number(), Some(3));
        assert!(buffer.is_empty());
    }

    #[test]
    fn leading_operators_go_with_the_first_number() {
        let mut buffer = buffer("(12");
        assert_eq!(buffer.clear_last_number(), Some(3));
        assert!(buffer.is_empty());
    }

    #[test]
    fn operator_only_buffer_is_cleared() {
        let mut buffer = buffer("+*(");
        assert_eq!(buffer.clear_last_number(), Some(3));
        assert!(buffer.is_empty());
    }

    #[test]
    fn clear_last_number_on_empty_reports_nothing() {
        assert_eq!(InputBuffer::default().clear_last_number(), None);
    }

    #[test]
    fn take_drains_the_buffer() {
        let mut buffer = buffer("1+2");
        assert_eq!(buffer.take(), "1+2");
        assert!(buffer.is_empty());
    }

    #[test]
    fn clear_reports_the_discarded_length() {
        let mut buffer = buffer("1+2+3");
        assert_eq!(buffer.clear(), 5);
        assert!(buffer.is_empty());
    }
}
