use crate::Action;

/// Ordered click-routing rules keyed by the clicked control's class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickRouter {
    rules: Vec<(String, Action)>,
}

impl ClickRouter {
    /// Router with no rules; every click falls through to navigation.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn route(mut self, class: impl Into<String>, action: Action) -> Self {
        self.rules.push((class.into(), action));
        self
    }

    /// First rule (in registration order) whose class is on the control.
    pub fn resolve<'a, I>(&self, classes: I) -> Option<Action>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<&str> = classes.into_iter().collect();
        self.rules
            .iter()
            .find(|(class, _)| classes.contains(&class.as_str()))
            .map(|(_, action)| *action)
    }
}

impl Default for ClickRouter {
    fn default() -> Self {
        Self::empty()
            .route("ingest", Action::Ingest)
            .route("ignore", Action::Ignore)
    }
}
