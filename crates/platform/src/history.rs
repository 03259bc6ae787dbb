use core_types::NavState;

/// What an engine-reported navigation turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observed {
    Visit,
    Back,
    Forward,
    Same,
}

/// Session history of one browser view: entries plus the current index.
#[derive(Clone, Debug, Default)]
pub struct NavHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Records a new entry, dropping the forward branch.
    pub fn visit(&mut self, url: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Replaces the current entry, e.g. after a redirect.
    pub fn replace_current(&mut self, url: String) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = url,
            None => self.visit(url),
        }
    }

    /// Records where a finished load actually landed. A redirect rewrites
    /// the entry its navigation started from.
    pub fn settle(&mut self, url: &str) {
        if self.current() != Some(url) {
            self.replace_current(url.to_string());
        }
    }

    /// Folds a navigation the engine started on its own (link, gesture,
    /// script) into the history. Adjacent entries are taken as back/forward.
    pub fn observe(&mut self, url: &str) -> Observed {
        if self.current() == Some(url) {
            return Observed::Same;
        }
        if self.can_go_back() && self.entries[self.index - 1] == url {
            self.index -= 1;
            return Observed::Back;
        }
        if self.can_go_forward() && self.entries[self.index + 1] == url {
            self.index += 1;
            return Observed::Forward;
        }
        self.visit(url.to_string());
        Observed::Visit
    }

    pub fn nav_state(&self, title: &str, loading: bool) -> NavState {
        NavState {
            url: self.current().unwrap_or_default().to_string(),
            title: title.to_string(),
            loading,
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
        }
    }
}
