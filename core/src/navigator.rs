/// Index-based preview over the gallery sequence. `None` means closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewNavigator {
    current: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKey {
    Close,
    Previous,
    Next,
}

impl PreviewKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(PreviewKey::Close),
            "ArrowLeft" => Some(PreviewKey::Previous),
            "ArrowRight" => Some(PreviewKey::Next),
            _ => None,
        }
    }

    /// Arrow keys would otherwise scroll the page behind the overlay.
    pub fn suppresses_default(self) -> bool {
        matches!(self, PreviewKey::Previous | PreviewKey::Next)
    }
}

impl PreviewNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The classic sentinel form: -1 while closed.
    pub fn current_index(&self) -> i64 {
        self.current.map_or(-1, |index| index as i64)
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.current = Some(index);
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        match self.current {
            Some(index) if index + 1 < len => {
                self.current = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.current {
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// Closes the preview once the sequence no longer holds the shown index.
    pub fn sync_len(&mut self, len: usize) {
        if self.current.is_some_and(|index| index >= len) {
            self.current = None;
        }
    }

    /// Applies a key while open. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: PreviewKey, len: usize) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            PreviewKey::Close => self.close(),
            PreviewKey::Previous => {
                self.previous();
            }
            PreviewKey::Next => {
                self.next(len);
            }
        }
        true
    }
}
