/// A single-line text input.
///
/// The cursor is a position in characters, from 0 to the text length included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    /// Create the field with the cursor after the text
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The text before the cursor
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_index(self.cursor)]
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_cursor() {
        let mut field = TextField::new("15");
        field.move_left();
        field.insert('2');
        assert_eq!(field.value(), "125");
        assert_eq!(field.cursor, 2);
        assert_eq!(field.before_cursor(), "12");
    }

    #[test]
    fn backspace_and_delete() {
        let mut field = TextField::new("abcd");
        field.backspace();
        assert_eq!(field.value(), "abc");

        field.move_home();
        field.backspace();
        assert_eq!(field.value(), "abc");

        field.delete();
        assert_eq!(field.value(), "bc");
        assert_eq!(field.cursor, 0);

        field.move_end();
        field.delete();
        assert_eq!(field.value(), "bc");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = TextField::new("ab");
        field.move_right();
        assert_eq!(field.cursor, 2);
        field.move_home();
        field.move_left();
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn multibyte_characters() {
        let mut field = TextField::new("héé");
        field.move_left();
        field.backspace();
        assert_eq!(field.value(), "hé");
        assert_eq!(field.before_cursor(), "h");
        field.insert('€');
        assert_eq!(field.value(), "h€é");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut field = TextField::new("100");
        field.clear();
        assert_eq!((field.value(), field.cursor), ("", 0));
    }
}
