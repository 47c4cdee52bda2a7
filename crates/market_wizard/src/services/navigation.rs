use log::debug;

/// Routing surface.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
    /// Returns the path now shown, if there was one to go back to.
    fn go_back(&mut self) -> Option<String>;
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    stack: Vec<String>,
}

impl HistoryNavigator {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            stack: vec![origin.into()],
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.stack.last().map(|s| s.as_str())
    }

    pub fn history(&self) -> &[String] {
        &self.stack
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, path: &str) {
        debug!("navigate -> {path}");
        self.stack.push(path.to_string());
    }

    fn go_back(&mut self) -> Option<String> {
        if self.stack.len() < 2 {
            return None;
        }
        self.stack.pop();
        let now = self.current().map(str::to_string);
        debug!("go back -> {:?}", now);
        now
    }
}
